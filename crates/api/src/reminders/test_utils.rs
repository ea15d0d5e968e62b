use anyhow::bail;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use cuthub_domain::{
    Appointment, Location, ReminderKind, ReminderWindow, Service, Shop, Tz, User,
    WindowUpperBound, ID,
};
use cuthub_infra::{
    CutHubContext, IAppointmentRepo, ILocationRepo, ISys, IUserRepo, InMemoryReminderNotifier,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Fri Mar 14 2025 10:20:00 UTC
pub const NOW: i64 = 1741947600000;

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

pub fn tomorrow() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub struct TestContext {
    pub ctx: CutHubContext,
    pub notifier: Arc<InMemoryReminderNotifier>,
    pub shop: Shop,
    pub service: Service,
}

pub async fn setup() -> TestContext {
    let mut ctx = CutHubContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    ctx.config.timezone = Tz::UTC;
    ctx.config.hour_reminder_upper_bound = WindowUpperBound::EndOfHour;
    let notifier = Arc::new(InMemoryReminderNotifier::new());
    ctx.notifier = notifier.clone();

    let shop = Shop::new("Barbearia Lisboa", "barbearia-lisboa");
    ctx.repos.shops.insert(&shop).await.unwrap();
    let service = Service::new(shop.id.clone(), "Corte de cabelo");
    ctx.repos.services.insert(&service).await.unwrap();

    TestContext {
        ctx,
        notifier,
        shop,
        service,
    }
}

impl TestContext {
    pub async fn insert_client(&self, name: &str, email: Option<&str>) -> User {
        let user = User::new(name, email.map(String::from));
        self.ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn insert_location(&self, name: &str, address: Option<&str>) -> Location {
        let location = Location::new(self.shop.id.clone(), name, address.map(String::from));
        self.ctx.repos.locations.insert(&location).await.unwrap();
        location
    }

    pub async fn insert_appointment(
        &self,
        client: &User,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Appointment {
        let appointment = Appointment::new(
            client.id.clone(),
            self.service.id.clone(),
            self.shop.id.clone(),
            date,
            time,
        );
        self.ctx.repos.appointments.insert(&appointment).await.unwrap();
        appointment
    }

    pub async fn find_appointment(&self, id: &ID) -> Appointment {
        self.ctx
            .repos
            .appointments
            .find(id)
            .await
            .unwrap()
            .expect("Appointment to exist")
    }
}

/// Fails every lookup that involves the given user
pub struct FailingUserRepo {
    pub inner: Arc<dyn IUserRepo>,
    pub failing_id: ID,
}

#[async_trait::async_trait]
impl IUserRepo for FailingUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        self.inner.insert(user).await
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        if user_id == &self.failing_id {
            bail!("Corrupt user document: {}", user_id);
        }
        self.inner.find(user_id).await
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        if user_ids.contains(&self.failing_id) {
            bail!("Corrupt user document: {}", self.failing_id);
        }
        self.inner.find_many(user_ids).await
    }
}

/// Store that can not be reached at all
pub struct UnreachableAppointmentRepo;

#[async_trait::async_trait]
impl IAppointmentRepo for UnreachableAppointmentRepo {
    async fn insert(&self, _appointment: &Appointment) -> anyhow::Result<()> {
        bail!("Connection refused")
    }

    async fn find(&self, _appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        bail!("Connection refused")
    }

    async fn find_due_for_reminder(
        &self,
        _window: &ReminderWindow,
    ) -> anyhow::Result<Vec<Appointment>> {
        bail!("Connection refused")
    }

    async fn claim_reminder(
        &self,
        _appointment_id: &ID,
        _kind: ReminderKind,
        _at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        bail!("Connection refused")
    }

    async fn release_reminder(
        &self,
        _appointment_id: &ID,
        _kind: ReminderKind,
        _claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        bail!("Connection refused")
    }
}

/// Counts the batched location lookups
pub struct CountingLocationRepo {
    inner: Arc<dyn ILocationRepo>,
    find_many_calls: AtomicUsize,
}

impl CountingLocationRepo {
    pub fn new(inner: Arc<dyn ILocationRepo>) -> Self {
        Self {
            inner,
            find_many_calls: AtomicUsize::new(0),
        }
    }

    pub fn find_many_calls(&self) -> usize {
        self.find_many_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ILocationRepo for CountingLocationRepo {
    async fn insert(&self, location: &Location) -> anyhow::Result<()> {
        self.inner.insert(location).await
    }

    async fn find_many(&self, location_ids: &[ID]) -> anyhow::Result<Vec<Location>> {
        self.find_many_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_many(location_ids).await
    }
}
