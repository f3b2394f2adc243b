use crate::{auth::TeacherStore, config::Config, roster::RosterMap};
use std::sync::Arc;

pub trait State: Send + Sync + Clone + 'static {
    fn config(&self) -> &Config;
    fn roster(&self) -> &RosterMap;
    fn teacher_store(&self) -> &dyn TeacherStore;
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: Config,
    roster: RosterMap,
    teacher_store: Box<dyn TeacherStore>,
}

impl AppState {
    pub fn new(config: Config, roster: RosterMap, teacher_store: Box<dyn TeacherStore>) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                roster,
                teacher_store,
            }),
        }
    }
}

impl State for AppState {
    fn config(&self) -> &Config {
        &self.inner.config
    }

    fn roster(&self) -> &RosterMap {
        &self.inner.roster
    }

    fn teacher_store(&self) -> &dyn TeacherStore {
        self.inner.teacher_store.as_ref()
    }
}
