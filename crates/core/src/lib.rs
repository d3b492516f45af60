pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    advice::Advice,
    bucket::Bucket,
    currency::{Currency, RateTable},
    dashboard::{DashboardView, PerformanceView},
    history::HistorySnapshot,
    portfolio::PortfolioData,
    targets::{default_milestones, FiTargets, Milestone},
};
use providers::traits::RateProvider;
use services::{
    advice_service::AdviceService,
    analytics_service::AnalyticsService,
    portfolio_service::{EditDraft, EditField, PortfolioService},
};
use storage::{backup::Backup, manager::StorageManager, store::KeyValueStore};

use errors::CoreError;

/// Main entry point for the dashboard core.
///
/// Holds the portfolio record in memory and mirrors it to the store: the
/// record is loaded once in [`FiDashboard::open`] and written back after
/// every successful mutation.
#[must_use]
pub struct FiDashboard<S: KeyValueStore> {
    store: S,
    data: PortfolioData,
    targets: FiTargets,
    milestones: Vec<Milestone>,
    rates: RateTable,
    /// Open edit form, if any
    draft: Option<EditDraft>,
    portfolio_service: PortfolioService,
    analytics_service: AnalyticsService,
    advice_service: AdviceService,
}

impl<S: KeyValueStore> std::fmt::Debug for FiDashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FiDashboard")
            .field("total", &self.data.total)
            .field("currency", &self.data.currency)
            .field("snapshots", &self.data.history.len())
            .field("rates_source", &self.rates.source)
            .field("editing", &self.draft.is_some())
            .finish()
    }
}

impl<S: KeyValueStore> FiDashboard<S> {
    /// Load the dashboard from `store`.
    ///
    /// A missing record starts from the built-in defaults. A record that
    /// can't be parsed is logged and also replaced by the defaults. Either
    /// way the resulting state is written back immediately.
    pub fn open(mut store: S, targets: FiTargets) -> Result<Self, CoreError> {
        let data = match StorageManager::load_portfolio(&store) {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!("no saved portfolio, starting from defaults");
                PortfolioData::default()
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading saved portfolio, using defaults");
                PortfolioData::default()
            }
        };

        let rates = match StorageManager::load_rates(&store) {
            Ok(Some(rates)) => rates,
            Ok(None) => RateTable::default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored exchange rates");
                RateTable::default()
            }
        };

        StorageManager::save_portfolio(&mut store, &data)?;

        Ok(Self {
            store,
            data,
            targets,
            milestones: default_milestones(),
            rates,
            draft: None,
            portfolio_service: PortfolioService::new(),
            analytics_service: AnalyticsService::new(),
            advice_service: AdviceService::new(),
        })
    }

    /// Replace the trajectory milestones.
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    #[must_use]
    pub fn targets(&self) -> &FiTargets {
        &self.targets
    }

    #[must_use]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand back the underlying store (e.g., to reopen it in a test).
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Views ───────────────────────────────────────────────────────

    /// The dashboard page in the display currency as of `today`.
    pub fn view(&self, today: NaiveDate) -> Result<DashboardView, CoreError> {
        self.view_as(self.data.currency, today)
    }

    /// The dashboard page in `currency` without changing the stored preference.
    pub fn view_as(&self, currency: Currency, today: NaiveDate) -> Result<DashboardView, CoreError> {
        let mut data = self.data.clone();
        data.currency = currency;
        self.analytics_service.build_view(
            &data,
            &self.targets,
            &self.rates,
            &self.milestones,
            today,
        )
    }

    /// The historical performance table in the display currency.
    pub fn performance(&self) -> Result<PerformanceView, CoreError> {
        self.performance_as(self.data.currency)
    }

    pub fn performance_as(&self, currency: Currency) -> Result<PerformanceView, CoreError> {
        self.analytics_service
            .performance(&self.data.history, &self.rates, currency)
    }

    /// Coach messages for the current state.
    pub fn advice(&self, today: NaiveDate) -> Result<Vec<Advice>, CoreError> {
        self.advice_as(self.data.currency, today)
    }

    pub fn advice_as(&self, currency: Currency, today: NaiveDate) -> Result<Vec<Advice>, CoreError> {
        let view = self.view_as(currency, today)?;
        let performance = self.performance_as(currency)?;
        Ok(self.advice_service.advise(&view, Some(&performance)))
    }

    /// Convert a base-currency amount to the display currency.
    pub fn to_display(&self, amount: f64) -> Result<f64, CoreError> {
        Ok(amount * self.rates.rate(self.data.currency)?)
    }

    // ── Edit form ───────────────────────────────────────────────────

    /// Open the edit form pre-filled with current values.
    /// Reopening discards any unsaved draft.
    pub fn open_edit(&mut self) -> &EditDraft {
        self.draft.insert(self.portfolio_service.open_edit(&self.data))
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    #[must_use]
    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Type into one field of the open form.
    pub fn edit_field(&mut self, field: EditField, text: impl Into<String>) -> Result<(), CoreError> {
        let draft = self.draft.as_mut().ok_or(CoreError::NotEditing)?;
        draft.set(field, text);
        Ok(())
    }

    /// Commit the open form. On a validation error the form stays open
    /// so the input can be corrected.
    pub fn save_edit(&mut self) -> Result<&PortfolioData, CoreError> {
        let draft = self.draft.as_ref().ok_or(CoreError::NotEditing)?;
        let updated = self.portfolio_service.save_edit(&self.data, draft)?;
        self.commit(updated)?;
        self.draft = None;
        tracing::info!(total = self.data.total, savings = self.data.savings, "portfolio updated");
        Ok(&self.data)
    }

    /// Close the form without applying it.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    // ── Direct mutations ────────────────────────────────────────────

    pub fn set_bucket(&mut self, bucket: Bucket, value: f64) -> Result<(), CoreError> {
        let mut updated = self.data.clone();
        self.portfolio_service.set_bucket(&mut updated, bucket, value)?;
        self.commit(updated)
    }

    pub fn set_monthly_savings(&mut self, value: f64) -> Result<(), CoreError> {
        let mut updated = self.data.clone();
        self.portfolio_service.set_monthly_savings(&mut updated, value)?;
        self.commit(updated)
    }

    /// Switch the display currency. The currency must have a known rate.
    pub fn set_currency(&mut self, currency: Currency) -> Result<(), CoreError> {
        self.rates.rate(currency)?;
        let mut updated = self.data.clone();
        updated.currency = currency;
        self.commit(updated)
    }

    /// Add or replace the year-end snapshot for `snapshot.year` (SGD).
    pub fn add_snapshot(&mut self, snapshot: HistorySnapshot) -> Result<(), CoreError> {
        let mut updated = self.data.clone();
        self.portfolio_service.upsert_snapshot(&mut updated, snapshot)?;
        self.commit(updated)
    }

    pub fn remove_snapshot(&mut self, year: i32) -> Result<HistorySnapshot, CoreError> {
        let mut updated = self.data.clone();
        let removed = self.portfolio_service.remove_snapshot(&mut updated, year)?;
        self.commit(updated)?;
        Ok(removed)
    }

    /// Throw away all data and start from the built-in defaults.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        self.draft = None;
        self.commit(PortfolioData::default())?;
        tracing::info!("portfolio reset to defaults");
        Ok(())
    }

    // ── Exchange rates ──────────────────────────────────────────────

    /// Pull the latest rates from `provider` for every supported currency.
    /// The table is only replaced if every returned rate is valid.
    /// Returns the number of rates updated.
    pub async fn refresh_rates(&mut self, provider: &dyn RateProvider) -> Result<usize, CoreError> {
        let quote = provider
            .latest_rates(Currency::BASE, &Currency::ALL)
            .await?;
        if quote.base != Currency::BASE {
            return Err(CoreError::Api {
                provider: provider.name().to_string(),
                message: format!("Expected rates based on {}, got {}", Currency::BASE, quote.base),
            });
        }

        let mut table = self.rates.clone();
        for (currency, rate) in &quote.rates {
            table.set_rate(*currency, *rate).map_err(|e| CoreError::Api {
                provider: provider.name().to_string(),
                message: e.to_string(),
            })?;
        }
        table.as_of = Some(quote.date);
        table.source = provider.name().to_string();
        table.clear_overrides();

        StorageManager::save_rates(&mut self.store, &table)?;
        self.rates = table;
        tracing::info!(
            provider = provider.name(),
            updated = quote.rates.len(),
            as_of = %quote.date,
            "exchange rates refreshed"
        );
        Ok(quote.rates.len())
    }

    /// Override a single rate by hand (e.g., from configuration). The
    /// table's source and date stay as they were; the code is marked as
    /// overridden.
    pub fn set_rate(&mut self, currency: Currency, rate: f64) -> Result<(), CoreError> {
        let mut table = self.rates.clone();
        table.override_rate(currency, rate)?;
        StorageManager::save_rates(&mut self.store, &table)?;
        self.rates = table;
        Ok(())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// The record as pretty-printed JSON (same shape as the stored one).
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Replace the record with one exported earlier (or saved by the
    /// browser dashboard).
    pub fn import_json(&mut self, json: &str) -> Result<(), CoreError> {
        let mut data = StorageManager::parse_portfolio(json)?;
        data.normalize();
        self.draft = None;
        self.commit(data)
    }

    pub fn export_backup(&self, password: &str) -> Result<Vec<u8>, CoreError> {
        Backup::export(&self.data, password)
    }

    pub fn import_backup(&mut self, bytes: &[u8], password: &str) -> Result<(), CoreError> {
        let data = Backup::import(bytes, password)?;
        self.draft = None;
        self.commit(data)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Persist first, then swap in memory, so a failed write leaves both
    /// copies as they were.
    fn commit(&mut self, data: PortfolioData) -> Result<(), CoreError> {
        StorageManager::save_portfolio(&mut self.store, &data)?;
        self.data = data;
        Ok(())
    }
}
