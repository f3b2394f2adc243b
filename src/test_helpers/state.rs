use crate::{
    app::state::State,
    auth::{TeacherStore, TeacherTable},
    config::{Config, TeachersConfig},
    roster::{Roster, RosterMap},
    test_helpers::teachers,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

#[derive(Clone)]
pub struct TestState {
    config: Config,
    roster: RosterMap,
    teacher_store: Arc<dyn TeacherStore>,
}

impl TestState {
    pub fn new() -> Self {
        Self::with_teacher_store(Arc::new(TestTeacherStore {
            table: teachers::table(),
        }))
    }

    pub fn with_broken_teacher_store() -> Self {
        Self::with_teacher_store(Arc::new(BrokenTeacherStore))
    }

    fn with_teacher_store(teacher_store: Arc<dyn TeacherStore>) -> Self {
        Self {
            config: Config {
                listener_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3000),
                metrics_listener_address: None,
                redirect_url: "/static/index.html".to_owned(),
                teachers: TeachersConfig {
                    path: "teachers.json".into(),
                    cache_ttl: None,
                },
            },
            roster: RosterMap::new(Roster::seeded()),
            teacher_store,
        }
    }
}

struct TestTeacherStore {
    table: TeacherTable,
}

#[async_trait]
impl TeacherStore for TestTeacherStore {
    async fn teachers(&self) -> Result<TeacherTable> {
        Ok(self.table.clone())
    }
}

struct BrokenTeacherStore;

#[async_trait]
impl TeacherStore for BrokenTeacherStore {
    async fn teachers(&self) -> Result<TeacherTable> {
        Err(anyhow!("Failed to read teachers from teachers.json"))
    }
}

impl State for TestState {
    fn config(&self) -> &Config {
        &self.config
    }

    fn roster(&self) -> &RosterMap {
        &self.roster
    }

    fn teacher_store(&self) -> &dyn TeacherStore {
        self.teacher_store.as_ref()
    }
}
