//! Domain models for Nexus.

pub mod chronicle;
pub mod connection;
pub mod contact;
pub mod pagination;
pub mod profile;
pub mod synergy;
pub mod work_entry;

pub use chronicle::{
    ChronicleEntryResponse, ChronicleKind, ChroniclePlaceResponse, CreateChronicleEntryRequest,
    CreateChroniclePlaceRequest, ListChronicleEntriesQuery, ListChronicleEntriesResponse,
    UpdateChronicleEntryRequest,
};
pub use connection::{
    normalize_invite_code, ConnectionResponse, ConnectionStatus, CreateInviteRequest,
    CreateInviteResponse, ListConnectionsQuery, RedeemInviteRequest, RedeemInviteResponse,
    RedemptionOutcome, INVITE_CODE_PREFIX, INVITE_CODE_SUFFIX_LEN,
};
pub use contact::{
    ContactResponse, CreateContactRequest, ListContactsQuery, ListContactsResponse,
    RelationshipType, UpdateContactRequest,
};
pub use pagination::Pagination;
pub use profile::{ProfileResponse, UpdateProfileRequest};
pub use synergy::{
    parse_synergy_sections, SynergyProfile, SynergyRequest, SynergyResponse,
};
pub use work_entry::{
    CreateWorkEntryRequest, ListWorkEntriesQuery, ListWorkEntriesResponse, UpdateWorkEntryRequest,
    WorkEntryResponse,
};
