//! Capability publisher: the documents a UAP service serves and the small
//! hotel API its booking module describes.

pub mod catalog;
pub mod hotel;
pub mod openapi;

pub use catalog::{booking_module, Catalog, ModuleEntry, OPENAPI_PATH};
pub use hotel::{Booking, BookingRequest, BookingStatus, HotelError, HotelStore, Room, SearchQuery};
pub use openapi::openapi_document;
