use crate::application::dto::{BomRequest, EditOutcome, LoadMode};
use crate::application::read_models::{BomReadModel, BomReadModelBuilder};
use crate::bom_structure::domain::{
    BomForest, BomHeader, BomSnapshot, LookupTables, MutationIntent,
};
use crate::bom_structure::policies::{MutationPlanner, PolicyViolation};
use crate::bom_structure::services::{BomTreeBuilder, ResolvedDrop, RowNormalizer};
use crate::ports::outbound::{BomRepository, Notifier};
use crate::shared::error::BomError;
use crate::shared::Result;
use std::cell::{Cell, Ref, RefCell};

/// Last successfully loaded state of the displayed BOM
#[derive(Default)]
struct LoadedBom {
    header: BomHeader,
    lookups: LookupTables,
    forest: BomForest,
}

/// Clears the loading gate on every exit path, including a dropped future
struct LoadingGuard<'a, N: Notifier> {
    flag: &'a Cell<bool>,
    notifier: &'a N,
}

impl<'a, N: Notifier> LoadingGuard<'a, N> {
    /// `None` when a call is already pending
    fn acquire(flag: &'a Cell<bool>, notifier: &'a N, message: &str) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        notifier.start_loading(message);
        Some(Self { flag, notifier })
    }
}

impl<N: Notifier> Drop for LoadingGuard<'_, N> {
    fn drop(&mut self) {
        self.flag.set(false);
        self.notifier.finish_loading();
    }
}

/// BomEditorSession - one displayed BOM version and its edits
///
/// The session follows a single-threaded, event-driven model: a boolean
/// `loading` gate refuses new backend calls while one is pending (there is
/// no queue), every accepted mutation is followed by a full reload, and
/// the forest is always rebuilt from the last snapshot that loaded
/// successfully. Failures never touch the current forest.
///
/// # Type Parameters
/// * `R` - BomRepository implementation
/// * `N` - Notifier implementation
pub struct BomEditorSession<R, N> {
    repository: R,
    notifier: N,
    request: BomRequest,
    loading: Cell<bool>,
    state: RefCell<LoadedBom>,
}

impl<R, N> BomEditorSession<R, N>
where
    R: BomRepository,
    N: Notifier,
{
    /// Creates a session; nothing is fetched until [`reload`](Self::reload)
    pub fn new(repository: R, notifier: N, request: BomRequest) -> Self {
        Self {
            repository,
            notifier,
            request,
            loading: Cell::new(false),
            state: RefCell::new(LoadedBom::default()),
        }
    }

    pub fn request(&self) -> &BomRequest {
        &self.request
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn forest(&self) -> Ref<'_, BomForest> {
        Ref::map(self.state.borrow(), |state| &state.forest)
    }

    pub fn header(&self) -> BomHeader {
        self.state.borrow().header.clone()
    }

    pub fn read_model(&self) -> BomReadModel {
        let state = self.state.borrow();
        BomReadModelBuilder::build(&state.header, &state.forest, &state.lookups)
    }

    /// BOM shown at the top of the view: the header's id, else the requested one
    pub fn displayed_bom(&self) -> Option<String> {
        self.state
            .borrow()
            .header
            .bom_id
            .clone()
            .or_else(|| Some(self.request.bom_id.clone()).filter(|id| !id.is_empty()))
    }

    /// Fetches the BOM and rebuilds the forest from scratch
    ///
    /// Tree anomalies are reported as warnings.
    ///
    /// # Errors
    /// Returns [`BomError::SessionBusy`] while another call is pending, or the
    /// repository error; in both cases the previous forest is kept
    pub async fn reload(&self) -> Result<()> {
        let _guard = LoadingGuard::acquire(&self.loading, &self.notifier, "Loading BOM...")
            .ok_or(BomError::SessionBusy)?;
        self.fetch_and_rebuild().await
    }

    /// Plans and submits a completed drag gesture
    pub async fn apply_drop(&self, drop: &ResolvedDrop) -> EditOutcome {
        self.submit(|planner| planner.plan_drop(drop)).await
    }

    /// Plans a mutation against the current forest and dispatches it
    ///
    /// Planning happens before the loading gate is taken, so a refused
    /// plan never reaches the backend.
    pub async fn submit<F>(&self, plan: F) -> EditOutcome
    where
        F: FnOnce(&MutationPlanner<'_>) -> std::result::Result<MutationIntent, PolicyViolation>,
    {
        if self.is_loading() {
            self.notifier
                .report_warning(&BomError::SessionBusy.to_string());
            return EditOutcome::Busy;
        }

        let planned = {
            let state = self.state.borrow();
            let displayed = self.displayed_bom();
            let planner = MutationPlanner::new(&state.forest, displayed.as_deref());
            plan(&planner)
        };

        match planned {
            Ok(intent) => self.dispatch(intent).await,
            Err(violation) => {
                self.notifier.report_error(&violation.to_string());
                EditOutcome::Blocked(violation)
            }
        }
    }

    async fn dispatch(&self, intent: MutationIntent) -> EditOutcome {
        let Some(_guard) = LoadingGuard::acquire(
            &self.loading,
            &self.notifier,
            &format!("Saving {}...", intent.action()),
        ) else {
            self.notifier
                .report_warning(&BomError::SessionBusy.to_string());
            return EditOutcome::Busy;
        };

        let response = match self.repository.dispatch(&intent).await {
            Ok(response) => response,
            Err(e) => {
                let message = format!("{} failed: {}", intent.action(), e);
                self.notifier.report_error(&message);
                return EditOutcome::Failed(message);
            }
        };

        if !response.success {
            let message = response
                .msg
                .clone()
                .unwrap_or_else(|| format!("The backend refused {}", intent.action()));
            self.notifier.report_error(&message);
            return EditOutcome::Rejected(message);
        }

        if let Err(e) = self.fetch_and_rebuild().await {
            self.notifier.report_warning(&format!(
                "{} was saved but the BOM could not be reloaded: {}",
                intent.action(),
                e
            ));
        }

        let message = response
            .msg
            .clone()
            .unwrap_or_else(|| format!("{} applied", intent.action()));
        self.notifier.report_completion(&message);
        EditOutcome::Applied(response)
    }

    /// Caller holds the loading gate
    async fn fetch_and_rebuild(&self) -> Result<()> {
        let snapshot = self.fetch().await?;

        let rows = RowNormalizer::normalize(&snapshot.components);
        let forest = BomTreeBuilder::build(&rows, &snapshot.routing);

        for anomaly in forest.anomalies() {
            self.notifier.report_warning(&anomaly.to_string());
        }
        self.notifier.report(&format!(
            "📦 Loaded {} component(s) and {} routing step(s)",
            forest.component_count(),
            forest.cycle_count()
        ));

        *self.state.borrow_mut() = LoadedBom {
            header: snapshot.header,
            lookups: snapshot.lookups,
            forest,
        };
        Ok(())
    }

    async fn fetch(&self) -> Result<BomSnapshot> {
        let request = &self.request;
        match request.mode {
            LoadMode::Full => {
                self.repository
                    .fetch_bom_full(&request.bom_id, request.version.as_deref())
                    .await
            }
            LoadMode::Multilevel { max_level } => {
                self.repository
                    .fetch_bom_multilevel(&request.bom_id, request.version.as_deref(), max_level)
                    .await
            }
        }
    }
}
