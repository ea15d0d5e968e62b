use anyhow::Context;
use cuthub_domain::{
    Appointment, Entity, Location, ReminderError, ReminderKind, ReminderPayload,
    ReminderRunSummary, Service, Shop, User, ID,
};
use cuthub_infra::CutHubContext;
use itertools::Itertools;
use std::{collections::HashMap, future::Future, slice};
use tracing::{error, warn};

/// Entities of one collection fetched up front for all the candidates of a window
enum Prefetched<T> {
    Loaded(HashMap<ID, T>),
    /// The batched lookup failed, every entity has to be looked up on its own
    Unavailable,
}

impl<T: Entity + Clone> Prefetched<T> {
    fn new(res: anyhow::Result<Vec<T>>, collection: &str) -> Self {
        match res {
            Ok(items) => Self::Loaded(
                items
                    .into_iter()
                    .map(|item| (item.id().clone(), item))
                    .collect(),
            ),
            Err(e) => {
                warn!(
                    "Batched lookup of {} failed, falling back to single lookups: {:?}",
                    collection, e
                );
                Self::Unavailable
            }
        }
    }

    /// Nothing is fetched when no candidate references the collection
    async fn load<F>(ids: &[ID], fetch: F, collection: &str) -> Self
    where
        F: Future<Output = anyhow::Result<Vec<T>>>,
    {
        if ids.is_empty() {
            return Self::Loaded(HashMap::new());
        }
        Self::new(fetch.await, collection)
    }

    /// `fetch` is only awaited when the batched lookup failed
    async fn resolve<F>(&self, id: &ID, fetch: F) -> anyhow::Result<Option<T>>
    where
        F: Future<Output = anyhow::Result<Vec<T>>>,
    {
        match self {
            Self::Loaded(items) => Ok(items.get(id).cloned()),
            Self::Unavailable => Ok(fetch.await?.into_iter().find(|item| item.id() == id)),
        }
    }
}

struct ReferenceData {
    users: Prefetched<User>,
    services: Prefetched<Service>,
    shops: Prefetched<Shop>,
    locations: Prefetched<Location>,
}

impl ReferenceData {
    async fn prefetch(
        kind: ReminderKind,
        appointments: &[Appointment],
        ctx: &CutHubContext,
    ) -> Self {
        let user_ids = appointments
            .iter()
            .flat_map(|a| std::iter::once(&a.client_id).chain(a.professional_id.as_ref()))
            .unique()
            .cloned()
            .collect::<Vec<_>>();
        let service_ids = appointments
            .iter()
            .map(|a| a.service_id.clone())
            .unique()
            .collect::<Vec<_>>();
        let shop_ids = appointments
            .iter()
            .map(|a| a.shop_id.clone())
            .unique()
            .collect::<Vec<_>>();
        // Only the last reminder tells the client where to go
        let location_ids = match kind {
            ReminderKind::DayBefore => Vec::new(),
            ReminderKind::HourBefore => appointments
                .iter()
                .filter_map(|a| a.location_id.clone())
                .unique()
                .collect::<Vec<_>>(),
        };

        Self {
            users: Prefetched::load(&user_ids, ctx.repos.users.find_many(&user_ids), "users")
                .await,
            services: Prefetched::load(
                &service_ids,
                ctx.repos.services.find_many(&service_ids),
                "services",
            )
            .await,
            shops: Prefetched::load(&shop_ids, ctx.repos.shops.find_many(&shop_ids), "shops")
                .await,
            locations: Prefetched::load(
                &location_ids,
                ctx.repos.locations.find_many(&location_ids),
                "locations",
            )
            .await,
        }
    }

    async fn user(&self, id: &ID, ctx: &CutHubContext) -> anyhow::Result<Option<User>> {
        self.users
            .resolve(id, ctx.repos.users.find_many(slice::from_ref(id)))
            .await
    }

    async fn service(&self, id: &ID, ctx: &CutHubContext) -> anyhow::Result<Option<Service>> {
        self.services
            .resolve(id, ctx.repos.services.find_many(slice::from_ref(id)))
            .await
    }

    async fn shop(&self, id: &ID, ctx: &CutHubContext) -> anyhow::Result<Option<Shop>> {
        self.shops
            .resolve(id, ctx.repos.shops.find_many(slice::from_ref(id)))
            .await
    }

    async fn location(&self, id: &ID, ctx: &CutHubContext) -> anyhow::Result<Option<Location>> {
        self.locations
            .resolve(id, ctx.repos.locations.find_many(slice::from_ref(id)))
            .await
    }
}

#[derive(Debug, PartialEq)]
enum DispatchOutcome {
    Sent,
    MissingEmail,
    AlreadySent,
}

async fn dispatch_reminder(
    appointment: &Appointment,
    kind: ReminderKind,
    refs: &ReferenceData,
    ctx: &CutHubContext,
) -> anyhow::Result<DispatchOutcome> {
    let client = refs
        .user(&appointment.client_id, ctx)
        .await
        .context("Unable to look up the client")?;
    let (client, to) = match client {
        Some(client) => match client.reminder_address() {
            Some(to) => {
                let to = to.to_string();
                (client, to)
            }
            None => return Ok(DispatchOutcome::MissingEmail),
        },
        None => return Ok(DispatchOutcome::MissingEmail),
    };

    let service = refs
        .service(&appointment.service_id, ctx)
        .await
        .context("Unable to look up the service")?;
    let shop = refs
        .shop(&appointment.shop_id, ctx)
        .await
        .context("Unable to look up the shop")?;
    let professional = match &appointment.professional_id {
        Some(id) => refs
            .user(id, ctx)
            .await
            .context("Unable to look up the professional")?,
        None => None,
    };
    let location = match (kind, &appointment.location_id) {
        (ReminderKind::HourBefore, Some(id)) => refs
            .location(id, ctx)
            .await
            .context("Unable to look up the location")?,
        _ => None,
    };

    let payload = ReminderPayload::new(
        appointment,
        &client,
        service.as_ref(),
        professional.as_ref(),
        shop.as_ref(),
        location.as_ref(),
    );

    let claimed_at = ctx.sys.now();
    let claimed = ctx
        .repos
        .appointments
        .claim_reminder(&appointment.id, kind, claimed_at)
        .await
        .context("Unable to mark the reminder as sent")?;
    if !claimed {
        return Ok(DispatchOutcome::AlreadySent);
    }

    let delivery = match kind {
        ReminderKind::DayBefore => ctx.notifier.send_reminder_24h(&to, &payload).await,
        ReminderKind::HourBefore => ctx.notifier.send_reminder_60min(&to, &payload).await,
    };
    if let Err(e) = delivery {
        if let Err(release_error) = ctx
            .repos
            .appointments
            .release_reminder(&appointment.id, kind, claimed_at)
            .await
        {
            error!(
                "Unable to release the {} reminder of appointment {} after a failed delivery: {:?}",
                kind, appointment.id, release_error
            );
        }
        return Err(e.context("Unable to deliver the reminder"));
    }

    Ok(DispatchOutcome::Sent)
}

/// Sends the `kind` reminder for every appointment and records the outcome in
/// the `summary`. A failing appointment never stops the others from being processed.
pub async fn dispatch_reminders(
    kind: ReminderKind,
    appointments: &[Appointment],
    ctx: &CutHubContext,
    summary: &mut ReminderRunSummary,
) {
    if appointments.is_empty() {
        return;
    }

    let refs = ReferenceData::prefetch(kind, appointments, ctx).await;
    for appointment in appointments {
        match dispatch_reminder(appointment, kind, &refs, ctx).await {
            Ok(DispatchOutcome::Sent) => summary.record_sent(kind),
            Ok(DispatchOutcome::MissingEmail) => summary.skipped_without_email += 1,
            Ok(DispatchOutcome::AlreadySent) => summary.already_sent += 1,
            Err(e) => {
                error!(
                    "Error sending {} reminder for appointment {}: {:?}",
                    kind, appointment.id, e
                );
                summary.errors.push(ReminderError {
                    kind,
                    appointment_id: appointment.id.clone(),
                    message: format!("{:#}", e),
                });
            }
        }
    }
}
