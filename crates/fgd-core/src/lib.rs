//! FGD Core Types
//!
//! This crate provides the in-memory document model for FGD (Forge Game Data)
//! files, the declarative format level editors use to describe entity classes.
//! It includes:
//!
//! - **Document**: The owned, ordered element list plus its name indices ([`document::Document`])
//! - **Elements**: Top-level directives such as `@include` and `@AutoVisGroup` ([`element`] module)
//! - **Entity classes**: Class headers, helpers, and bodies ([`entity::EntityClass`])
//! - **Properties**: Keyvalues, choices, and flags ([`property`] module)
//! - **IO**: Entity inputs and outputs ([`io::Io`])
//!
//! The model holds no parsing or rendering logic. Parsing lives in
//! `fgd-parser`, rendering in `fgd`.

pub mod document;
pub mod element;
pub mod entity;
pub mod io;
pub mod property;

mod error;

pub use document::Document;
pub use element::{AutoVisGroup, Element, Include, MapSize, MaterialExclusion, Version, VisGroupChild};
pub use entity::{ClassType, EntityClass};
pub use error::ModelError;
pub use io::{Io, IoDirection};
pub use property::{ChoiceItem, FlagItem, Property, PropertyKind};
