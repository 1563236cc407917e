//! Ticketing Service - issuance and door validation
//!
//! The service is the only writer of tokens and the sole authority for
//! admission. It never holds an entity-store lock across an await: every
//! store call returns owned data before delivery runs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use iv_01_entity_store::{EntityKind, EntityStoreApi, InvalidStateReason, StoreError};
use iv_telemetry::{
    metric_inc, time_histogram, CHECKIN_REJECTIONS, CHECKIN_SCANS, CHECKIN_SCAN_DURATION,
    DELIVERIES, TICKETS_ISSUED,
};
use shared_crypto::TicketSigner;
use shared_types::{EventId, GuestId, Rsvp, RsvpId, RsvpStatus};
use tracing::{debug, info, warn};

use crate::config::TicketingConfig;
use crate::domain::codec::TokenCodec;
use crate::domain::outcome::{CheckInOutcome, RejectReason};
use crate::domain::payload::TicketPayload;
use crate::error::{ConfigError, TicketError, TicketResult};
use crate::ports::inbound::{RsvpResponse, TicketingApi};
use crate::ports::outbound::{DeliveryRequest, TicketDelivery, TimeSource};

/// Issuance and check-in over an entity store.
pub struct TicketingService<S, D>
where
    S: EntityStoreApi,
    D: TicketDelivery,
{
    config: TicketingConfig,
    grace_window: Duration,
    store: Arc<S>,
    codec: TokenCodec,
    delivery: Arc<D>,
    time_source: Arc<dyn TimeSource>,
}

impl<S, D> TicketingService<S, D>
where
    S: EntityStoreApi,
    D: TicketDelivery,
{
    /// Create a ticketing service. Fails on invalid configuration.
    pub fn new(
        config: TicketingConfig,
        store: Arc<S>,
        signer: Arc<dyn TicketSigner>,
        delivery: Arc<D>,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grace_window = config
            .grace_window()
            .ok_or(ConfigError::GraceWindowOutOfRange(config.grace_window_secs))?;
        let codec = TokenCodec::new(signer, config.max_token_len);
        Ok(Self {
            config,
            grace_window,
            store,
            codec,
            delivery,
            time_source,
        })
    }

    pub fn config(&self) -> &TicketingConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    // =========================================================================
    // ISSUANCE
    // =========================================================================

    fn current_rsvp(&self, rsvp_id: &RsvpId) -> TicketResult<Rsvp> {
        let rsvp = self.store.rsvp(rsvp_id).ok_or_else(|| StoreError::NotFound {
            kind: EntityKind::Rsvp,
            id: rsvp_id.to_string(),
        })?;
        let is_current = self
            .store
            .current_rsvp_for_guest(&rsvp.guest_id)
            .is_some_and(|current| &current.id == rsvp_id);
        if !is_current {
            return Err(invalid(rsvp_id, InvalidStateReason::Superseded));
        }
        Ok(rsvp)
    }

    fn issue_token(&self, rsvp_id: &RsvpId) -> TicketResult<String> {
        let rsvp = self.current_rsvp(rsvp_id)?;
        if !rsvp.status.is_confirmed() {
            return Err(invalid(rsvp_id, InvalidStateReason::NotConfirmed));
        }
        if rsvp.has_token() {
            return Err(invalid(rsvp_id, InvalidStateReason::TokenAlreadyAttached));
        }
        let guest = self
            .store
            .guest(&rsvp.guest_id)
            .ok_or_else(|| not_found(EntityKind::Guest, &rsvp.guest_id))?;
        let event = self
            .store
            .event(&rsvp.event_id)
            .ok_or_else(|| not_found(EntityKind::Event, &rsvp.event_id))?;

        let payload = TicketPayload::for_rsvp(&rsvp, &guest, &event, self.time_source.now());
        let token = self.codec.encode(&payload)?;
        // Racing issuers both encode; the store lets exactly one attach.
        self.store.attach_token(rsvp_id, &token)?;

        metric_inc!(TICKETS_ISSUED);
        info!(
            rsvp_id = %rsvp_id,
            guest_id = %guest.id,
            event_id = %event.id,
            token_len = token.len(),
            "Ticket issued"
        );
        Ok(token)
    }

    fn issue_all(&self, event_id: &EventId) -> Vec<(RsvpId, TicketResult<String>)> {
        if self.store.event(event_id).is_none() {
            warn!(event_id = %event_id, "Batch issuance for unknown event");
            return Vec::new();
        }
        let results: Vec<_> = self
            .store
            .rsvps_for_event(event_id)
            .into_iter()
            .filter(|rsvp| rsvp.status.is_confirmed() && !rsvp.has_token())
            .map(|rsvp| {
                let result = self.issue_token(&rsvp.id);
                (rsvp.id, result)
            })
            .collect();
        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(
            event_id = %event_id,
            issued = results.len() - failed,
            failed,
            "Batch issuance finished"
        );
        results
    }

    async fn send(&self, rsvp: &Rsvp, token: String) -> TicketResult<()> {
        let guest = self
            .store
            .guest(&rsvp.guest_id)
            .ok_or_else(|| not_found(EntityKind::Guest, &rsvp.guest_id))?;
        let event = self
            .store
            .event(&rsvp.event_id)
            .ok_or_else(|| not_found(EntityKind::Event, &rsvp.event_id))?;
        let request = DeliveryRequest {
            rsvp_id: rsvp.id.clone(),
            guest_id: guest.id,
            guest_name: guest.name,
            contact: guest.contact,
            event_id: event.id,
            event_name: event.name,
            token,
        };

        match self.delivery.deliver(request).await {
            Ok(()) => {
                metric_inc!(DELIVERIES, &["success"]);
                debug!(rsvp_id = %rsvp.id, "Ticket delivered");
                Ok(())
            }
            Err(e) => {
                metric_inc!(DELIVERIES, &["failure"]);
                warn!(rsvp_id = %rsvp.id, error = %e, "Ticket delivery failed");
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // CHECK-IN
    // =========================================================================

    /// Decode, bind to the door's event, check freshness, then redeem.
    ///
    /// Only the final step mutates state, so every rejection can be
    /// re-scanned.
    pub fn check_in(&self, token: &str, event_id: &EventId) -> CheckInOutcome {
        let _timer = time_histogram!(CHECKIN_SCAN_DURATION);
        let outcome = self.evaluate(token, event_id);

        metric_inc!(CHECKIN_SCANS, &[outcome.label()]);
        match &outcome {
            CheckInOutcome::Admitted {
                guest_name,
                rsvp_id,
            } => {
                info!(event_id = %event_id, rsvp_id = %rsvp_id, guest = %guest_name, "Guest admitted");
            }
            CheckInOutcome::AlreadyUsed {
                guest_name,
                rsvp_id,
            } => {
                warn!(event_id = %event_id, rsvp_id = %rsvp_id, guest = %guest_name, "Ticket already used");
            }
            CheckInOutcome::Invalid { reason } => {
                metric_inc!(CHECKIN_REJECTIONS, &[reason.as_str()]);
                warn!(event_id = %event_id, reason = %reason, "Scan rejected");
            }
        }
        outcome
    }

    fn evaluate(&self, token: &str, event_id: &EventId) -> CheckInOutcome {
        let ticket = match self.codec.decode(token) {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!(error = %e, "Token failed to decode");
                return CheckInOutcome::invalid(RejectReason::from(&e));
            }
        };

        if ticket.event_id() != event_id {
            return CheckInOutcome::invalid(RejectReason::WrongEvent);
        }

        let now = self.time_source.now();
        let expired = ticket
            .event_start_at()
            .checked_add_signed(self.grace_window)
            .is_some_and(|deadline| now > deadline);
        if expired {
            return CheckInOutcome::invalid(RejectReason::Expired);
        }

        let guest_name = ticket.guest_name().to_string();
        let rsvp_id = ticket.rsvp_id().clone();
        match self.store.try_redeem_token(&rsvp_id, token, now) {
            Ok(true) => CheckInOutcome::Admitted {
                guest_name,
                rsvp_id,
            },
            Ok(false) => CheckInOutcome::AlreadyUsed {
                guest_name,
                rsvp_id,
            },
            Err(StoreError::NotFound { .. }) => CheckInOutcome::invalid(RejectReason::UnknownTicket),
            Err(StoreError::InvalidState {
                reason: InvalidStateReason::TokenMismatch,
                ..
            }) => CheckInOutcome::invalid(RejectReason::UnknownTicket),
            Err(e) => {
                debug!(rsvp_id = %rsvp_id, error = %e, "Redemption refused");
                CheckInOutcome::invalid(RejectReason::Revoked)
            }
        }
    }
}

#[async_trait]
impl<S, D> TicketingApi for TicketingService<S, D>
where
    S: EntityStoreApi,
    D: TicketDelivery,
{
    async fn issue(&self, rsvp_id: &RsvpId) -> TicketResult<String> {
        self.issue_token(rsvp_id)
    }

    async fn issue_for_event(&self, event_id: &EventId) -> Vec<(RsvpId, TicketResult<String>)> {
        self.issue_all(event_id)
    }

    async fn respond(
        &self,
        guest_id: &GuestId,
        event_id: &EventId,
        status: RsvpStatus,
        message: Option<String>,
    ) -> TicketResult<RsvpResponse> {
        let rsvp = self.store.record_rsvp(guest_id, event_id, status, message)?;
        if !status.is_confirmed() {
            return Ok(RsvpResponse {
                rsvp,
                token: None,
                delivered: false,
            });
        }

        let token = self.issue_token(&rsvp.id)?;
        let delivered = self.send(&rsvp, token.clone()).await.is_ok();
        let rsvp = self.store.rsvp(&rsvp.id).unwrap_or(rsvp);
        Ok(RsvpResponse {
            rsvp,
            token: Some(token),
            delivered,
        })
    }

    async fn redeliver(&self, rsvp_id: &RsvpId) -> TicketResult<()> {
        let rsvp = self.current_rsvp(rsvp_id)?;
        let token = rsvp
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| invalid(rsvp_id, InvalidStateReason::NoToken))?;
        self.send(&rsvp, token).await
    }

    async fn validate(&self, token: &str, event_id: &EventId) -> CheckInOutcome {
        self.check_in(token, event_id)
    }
}

fn invalid(rsvp_id: &RsvpId, reason: InvalidStateReason) -> TicketError {
    TicketError::Store(StoreError::InvalidState {
        subject: rsvp_id.to_string(),
        reason,
    })
}

fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> TicketError {
    TicketError::Store(StoreError::NotFound {
        kind,
        id: id.to_string(),
    })
}
