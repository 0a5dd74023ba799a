#![allow(dead_code)]

pub mod document;
pub mod errors;
pub mod model;
pub mod ports;

mod serialize;
mod style;

pub use document::HtmlDocument;
pub use errors::{DomError, DomResult};
pub use model::{
    DispatchedEvent, EventKind, SelectOption, ValueInterception, WriteChannel, WriteRecord,
};
pub use ports::{DomReader, DomWriter};
