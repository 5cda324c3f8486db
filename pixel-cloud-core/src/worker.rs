/// Background sampling worker for large rasters
use crate::config::SamplingConfig;
use crate::raster::Raster;
use crate::sampler;
use crate::store::{CloudStore, SampleTicket};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

struct SampleJob {
    ticket: SampleTicket,
    raster: Arc<Raster>,
    config: SamplingConfig,
}

/// Dedicated sampling thread fed through a job channel.
/// Every queued job runs to completion, but its result passes through the
/// store's ticket gate, so a superseded job is computed and then discarded
/// rather than overwriting a newer cloud. Dropping the worker closes the
/// queue and joins the thread after it drains.
pub struct SampleWorker {
    store: Arc<CloudStore>,
    jobs: Option<Sender<SampleJob>>,
    handle: Option<JoinHandle<()>>,
}

impl SampleWorker {
    /// Spawn the worker against a shared store
    pub fn spawn(store: Arc<CloudStore>) -> Self {
        let (jobs, queue) = mpsc::channel::<SampleJob>();
        let worker_store = Arc::clone(&store);

        let handle = std::thread::spawn(move || {
            while let Ok(job) = queue.recv() {
                let cloud = sampler::sample(&job.raster, &job.config);
                worker_store.publish(job.ticket, cloud);
            }
        });

        Self {
            store,
            jobs: Some(jobs),
            handle: Some(handle),
        }
    }

    /// Queue a sampling pass and return the ticket it will publish under.
    /// The ticket supersedes all earlier submissions immediately, before the
    /// pass has run.
    pub fn submit(&self, raster: Arc<Raster>, config: SamplingConfig) -> SampleTicket {
        let ticket = self.store.begin_sample();
        if let Some(jobs) = &self.jobs {
            // A closed channel means the thread is gone; the ticket then
            // simply never publishes
            let _ = jobs.send(SampleJob {
                ticket,
                raster,
                config,
            });
        }
        ticket
    }

    pub fn store(&self) -> &Arc<CloudStore> {
        &self.store
    }
}

impl Drop for SampleWorker {
    fn drop(&mut self) {
        // Closing the sender lets the thread drain remaining jobs and exit
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
