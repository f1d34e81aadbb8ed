//! Invite redemption: turns a pending connection into an accepted one
//! and materializes the bidirectional contact relationship.
//!
//! The routine is re-entrant by construction. It can be triggered twice
//! for the same user and code (once from the auth callback, once from a
//! manual redemption) and may run again after a half-finished earlier
//! attempt, so every write is either a natural-key upsert or a
//! conditional update guarded on the state it expects to replace.

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use domain::models::{normalize_invite_code, RedemptionOutcome};
use persistence::repositories::{ConnectionRepository, ContactRepository, ProfileRepository};

/// Service executing the redemption workflow.
pub struct RedemptionService {
    connections: ConnectionRepository,
    contacts: ContactRepository,
    profiles: ProfileRepository,
}

impl RedemptionService {
    /// Creates a new redemption service.
    pub fn new(pool: PgPool) -> Self {
        Self {
            connections: ConnectionRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Redeems an invite code on behalf of an authenticated invitee.
    ///
    /// Every precondition failure is reported as a typed outcome rather
    /// than an error; only database failures surface as `Err`. Callers
    /// decide what to do with the outcome: the auth callback logs it and
    /// proceeds with login, the client endpoint returns it to the UI.
    pub async fn redeem(
        &self,
        invitee_id: Uuid,
        raw_code: &str,
    ) -> Result<RedemptionOutcome, sqlx::Error> {
        let code = normalize_invite_code(raw_code);

        // An accepted connection no longer matches, so redeeming the same
        // code twice stops here.
        let connection = match self.connections.find_pending_by_code(&code).await? {
            Some(connection) => connection,
            None => {
                debug!(code = %code, "No pending connection for invite code");
                return Ok(RedemptionOutcome::CodeNotFound);
            }
        };

        if connection.is_self_redemption(invitee_id) {
            debug!(connection_id = %connection.id, "Rejected self-redemption");
            return Ok(RedemptionOutcome::SelfInvite);
        }

        if self
            .connections
            .exists_accepted_between(connection.inviter_id, invitee_id)
            .await?
        {
            debug!(
                inviter_id = %connection.inviter_id,
                invitee_id = %invitee_id,
                "Users are already connected"
            );
            return Ok(RedemptionOutcome::AlreadyConnected);
        }

        let inviter_profile = match self.profiles.find_by_user_id(connection.inviter_id).await? {
            Some(profile) => profile,
            None => return Ok(RedemptionOutcome::ProfileMissing),
        };
        let invitee_profile = match self.profiles.find_by_user_id(invitee_id).await? {
            Some(profile) => profile,
            None => return Ok(RedemptionOutcome::ProfileMissing),
        };

        // Inviter's card for the invitee: reuse an existing card, fill in
        // the placeholder the invite was created with, or upsert a fresh
        // one from the invitee's snapshot.
        let inviter_card_id = match self
            .contacts
            .find_by_owner_and_linked(connection.inviter_id, invitee_id)
            .await?
        {
            Some(card) => card.id,
            None => {
                let linked_placeholder = match connection.contact_id {
                    Some(placeholder_id) => self
                        .contacts
                        .link_placeholder(placeholder_id, connection.inviter_id, invitee_id)
                        .await?
                        .then_some(placeholder_id),
                    None => None,
                };

                match linked_placeholder {
                    Some(placeholder_id) => placeholder_id,
                    None => {
                        self.contacts
                            .upsert_linked(connection.inviter_id, invitee_id, &invitee_profile)
                            .await?
                            .id
                    }
                }
            }
        };

        // Reciprocal card for the invitee, from the inviter's snapshot.
        self.contacts
            .upsert_linked(invitee_id, connection.inviter_id, &inviter_profile)
            .await?;

        // Conditional acceptance; losing the race to a concurrent
        // redemption of the same code lands in AlreadyConnected.
        if !self
            .connections
            .accept(connection.id, invitee_id, inviter_card_id)
            .await?
        {
            debug!(connection_id = %connection.id, "Connection accepted concurrently");
            return Ok(RedemptionOutcome::AlreadyConnected);
        }

        info!(
            connection_id = %connection.id,
            inviter_id = %connection.inviter_id,
            invitee_id = %invitee_id,
            contact_id = %inviter_card_id,
            "Invite redeemed"
        );

        Ok(RedemptionOutcome::Accepted {
            connection_id: connection.id,
            contact_id: inviter_card_id,
        })
    }
}
