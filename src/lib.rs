//! # Instance-caching object construction.
//!
//! A [`Container`] turns a symbolic type name plus call-site arguments into
//! an instance, and hands back the *same* instance for every equivalent
//! request afterwards. Constructor dependencies are resolved recursively, so
//! callers never wire object graphs by hand.
//!
//! By default instances are held behind thread-safe pointers
//! ([`Arc<T>`](std::sync::Arc)). This can be changed to
//! [`Rc<T>`](std::rc::Rc) by disabling default features and enabling the
//! "rc" feature:
//!
//! ```text
//! [dependencies.typewire]
//! version = "*" # Replace with the version you want to use
//! default-features = false
//! features = ["rc"]
//! ```
//!
//! ## Regular and virtual types
//!
//! A requested name that the [`TypeIntrospector`] knows is a *regular* type.
//! It is built by the first factory in the chain that defines an override
//! method matching the name's short form (the bare type name) or long form
//! (the full path with `::` flattened to underscores) — or, when no factory
//! overrides it, autowired from its registered constructor parameters. Any
//! other name is a *virtual* type: a factory method with exactly that name
//! acts as a named constructor for values with no type identity of their
//! own.
//!
//! ## Override methods
//!
//! Override methods exist so application code can special-case construction
//! (connecting to external resources, wrapping primitives) while ordinary
//! dependency graphs are still autowired for free. Short names win over
//! long names; the long form stays available to disambiguate two types that
//! share a short name.
//!
//! ## Delegation
//!
//! A container can be built with several factories. They form an ordered
//! chain consulted front to back: a factory that defines no method for a
//! request delegates to the next one, and the last factory falls back to
//! autowiring. Dependencies resolve back through the container, so a
//! dependency can be satisfied by a different factory than the one building
//! the dependent.
//!
//! ## Example
//!
//! ```
//! use typewire::{
//!     dependency, Container, Factory, Instance, MethodTable, ParameterInfo,
//!     Signature, Svc, TypeInfo, TypeRegistry, Value,
//! };
//!
//! // Application settings. The container treats this as an opaque value
//! // and hands it unchanged to every factory method.
//! struct Settings {
//!     connection_string: String,
//! }
//!
//! // Built by an override method because its constructor needs a scalar.
//! struct Database {
//!     connection_string: String,
//! }
//!
//! // Autowired: its only dependency is another registered type.
//! struct UserRepository {
//!     database: Svc<Database>,
//! }
//!
//! struct AppFactory;
//!
//! impl Factory for AppFactory {
//!     fn register(&self, methods: &mut MethodTable) {
//!         // Overrides construction of `Database` by its short name.
//!         methods.define("Database", Signature::exact(0), |context, _| {
//!             let settings = context
//!                 .configuration()
//!                 .downcast::<Settings>()
//!                 .ok_or("configuration is not Settings")?;
//!             Ok(Value::object(Database {
//!                 connection_string: settings.connection_string.clone(),
//!             }))
//!         });
//!     }
//! }
//!
//! fn main() -> Result<(), typewire::InjectError> {
//!     let mut registry = TypeRegistry::new();
//!     registry.declare::<Database>(vec![ParameterInfo::scalar(
//!         "connection_string",
//!         "String",
//!     )]);
//!     registry.register::<UserRepository, _>(
//!         vec![ParameterInfo::service::<Database>("database")],
//!         |deps| {
//!             Ok(Instance::new(UserRepository {
//!                 database: dependency::<Database>(&deps, 0)?,
//!             }))
//!         },
//!     );
//!     registry.register_factory(|| AppFactory);
//!
//!     let container = Container::new(
//!         Instance::new(Settings {
//!             connection_string: "sqlite::memory:".into(),
//!         }),
//!         Svc::new(registry),
//!         &[TypeInfo::of::<AppFactory>().name()],
//!     )?;
//!
//!     let repository = container
//!         .get(TypeInfo::of::<UserRepository>().name())?
//!         .downcast::<UserRepository>()
//!         .unwrap();
//!     assert_eq!("sqlite::memory:", repository.database.connection_string);
//!
//!     // Equivalent requests always return the same instance.
//!     let again = container
//!         .get(TypeInfo::of::<UserRepository>().name())?
//!         .downcast::<UserRepository>()
//!         .unwrap();
//!     assert!(Svc::ptr_eq(&repository, &again));
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::needless_doctest_main,
    clippy::needless_pass_by_value
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod chain;
mod container;
mod descriptor;
mod errors;
mod factory;
mod introspect;
mod registry;
mod services;
mod value;

pub use container::*;
pub use descriptor::*;
pub use errors::*;
pub use factory::*;
pub use introspect::*;
pub use registry::*;
pub use services::*;
pub use value::*;
