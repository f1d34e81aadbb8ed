//! Repository implementations.

pub mod chronicle_entry;
pub mod chronicle_place;
pub mod connection;
pub mod contact;
pub mod profile;
pub mod work_entry;

pub use chronicle_entry::ChronicleEntryRepository;
pub use chronicle_place::ChroniclePlaceRepository;
pub use connection::{generate_invite_code, ConnectionRepository};
pub use contact::ContactRepository;
pub use profile::ProfileRepository;
pub use work_entry::WorkEntryRepository;
