use crate::config::TableConfig;
use crate::framework::{ShutdownCoordinator, TableError};
use crate::model::{DinnerSummary, EventSink, PhilosopherReport, TableStats};
use crate::philosopher_actor::{Philosopher, TableContext};
use crate::resource::ResourcePool;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator for a dinner.
///
/// `DiningSystem` is responsible for:
/// - **Seating**: Validating every seat before anyone starts eating
/// - **Lifecycle Management**: Spawning one Tokio task per philosopher and joining them all
/// - **Teardown**: Checking that no utensil is still held before the table is cleared
///
/// # Example
///
/// ```ignore
/// let system = DiningSystem::from_config(&config, EventSink::disabled())?;
///
/// // Watch progress while they eat
/// let meals = system.stats().total_meals();
///
/// // Stop everyone and wait for them to leave
/// let summary = system.shutdown().await?;
/// ```
pub struct DiningSystem {
    ctx: TableContext,

    /// One task per seat, in seat order
    handles: Vec<JoinHandle<PhilosopherReport>>,
}

impl DiningSystem {
    /// Seats a philosopher at every seat of `ctx` and starts them all.
    ///
    /// Every seat is validated first, so an invalid table starts nobody.
    pub fn start(ctx: TableContext) -> Result<Self, TableError> {
        let philosophers = (0..ctx.seats())
            .map(|index| Philosopher::new(index, ctx.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let handles = philosophers
            .into_iter()
            .map(|philosopher| tokio::spawn(philosopher.run()))
            .collect();

        info!(seats = ctx.seats(), policy = ?ctx.second_acquire, "Dinner started");
        Ok(Self { ctx, handles })
    }

    /// Builds the table described by `config` and starts it.
    pub fn from_config(config: &TableConfig, events: EventSink) -> Result<Self, TableError> {
        config.validate()?;
        let ctx = TableContext::new(config.seats, config.timing()?)?
            .with_events(events)
            .with_second_acquire(config.second_acquire());
        Self::start(ctx)
    }

    /// A handle that can stop the dinner from anywhere (signal listener, timer, test).
    pub fn shutdown_handle(&self) -> ShutdownCoordinator {
        self.ctx.shutdown.clone()
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.ctx.pool
    }

    pub fn stats(&self) -> &TableStats {
        &self.ctx.stats
    }

    /// Requests shutdown and waits for every philosopher to leave.
    pub async fn shutdown(self) -> Result<DinnerSummary, TableError> {
        info!("Shutting down dinner...");
        self.ctx.shutdown.request_shutdown();
        self.join().await
    }

    /// Waits for every philosopher to leave, without requesting shutdown itself.
    ///
    /// All tasks are joined even if one of them failed; the first failure is
    /// returned afterwards. The utensils are cleared only once everyone is gone.
    pub async fn join(self) -> Result<DinnerSummary, TableError> {
        let mut summary = DinnerSummary::default();
        let mut failure = None;

        for (index, handle) in self.handles.into_iter().enumerate() {
            match handle.await {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!(seat = index, "Philosopher task failed: {:?}", e);
                    failure.get_or_insert(TableError::ActorFailed {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        for utensil in self.ctx.pool.iter() {
            if let Some(holder) = utensil.holder() {
                error!(utensil = utensil.index(), holder, "Utensil still held after dinner");
                return Err(TableError::LeakedHold {
                    index: utensil.index(),
                    holder,
                });
            }
        }

        info!(meals = summary.total_meals(), "Dinner complete");
        Ok(summary)
    }
}
