//! Entity definitions (database row mappings).

pub mod chronicle_entry;
pub mod chronicle_place;
pub mod connection;
pub mod contact;
pub mod profile;
pub mod work_entry;

pub use chronicle_entry::ChronicleEntryEntity;
pub use chronicle_place::ChroniclePlaceEntity;
pub use connection::ConnectionEntity;
pub use contact::ContactEntity;
pub use profile::ProfileEntity;
pub use work_entry::WorkEntryEntity;
