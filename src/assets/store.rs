use std::{
    collections::HashSet,
    sync::{Arc, mpsc},
};

use rayon::prelude::*;

use crate::{
    assets::decode::{SamplerOpts, SourceImageSample, sample_image},
    foundation::error::{PixmorphError, PixmorphResult},
};

#[derive(Clone, Debug)]
/// One image supplied by the asset provider.
pub struct AssetSource {
    /// Provider-assigned identifier, unique within a library.
    pub id: String,
    /// Encoded image bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl AssetSource {
    /// Build a source from an id and encoded bytes.
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            bytes: Arc::new(bytes),
        }
    }
}

#[derive(Clone, Debug)]
/// Sampling work item handed to a [`SamplingBatch`].
pub struct SampleRequest {
    /// Asset id.
    pub id: String,
    /// Ticket identifying the library entry this request was issued for.
    pub ticket: u64,
    /// Encoded image bytes.
    pub bytes: Arc<Vec<u8>>,
}

#[derive(Debug)]
/// Outcome of sampling one asset.
pub struct SampledAsset {
    /// Asset id.
    pub id: String,
    /// Ticket copied from the originating [`SampleRequest`].
    pub ticket: u64,
    /// Sample, or the decode error that prevented it.
    pub result: PixmorphResult<SourceImageSample>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What [`AssetLibrary::apply`] did with a result.
pub enum ApplyOutcome {
    /// The sample was stored.
    Applied,
    /// The image failed to decode and will be skipped.
    Failed,
    /// The entry was removed or replaced after the request was issued; the result was dropped.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryState {
    Pending,
    InFlight,
    Ready,
    Failed,
}

#[derive(Clone, Debug)]
struct Entry {
    id: String,
    ticket: u64,
    bytes: Arc<Vec<u8>>,
    state: EntryState,
    /// Last good sample; kept while a resample under new options is pending.
    sample: Option<Arc<SourceImageSample>>,
}

impl Entry {
    fn request(&self) -> SampleRequest {
        SampleRequest {
            id: self.id.clone(),
            ticket: self.ticket,
            bytes: Arc::clone(&self.bytes),
        }
    }
}

/// Worker count of a sampling pool when none is configured: half the cores, at least one.
pub fn default_sampler_threads() -> usize {
    std::thread::available_parallelism()
        .map_or(1, |n| n.get())
        .div_ceil(2)
}

#[derive(Clone, Debug)]
/// Ordered image set with per-entry sampling state.
///
/// Every mutation bumps [`revision`](Self::revision); the frame driver rebuilds its buffer list
/// when the revision it last saw differs. Each entry carries a ticket so results from sampling
/// batches that were in flight when the entry was removed or replaced are discarded.
///
/// Decoding never runs on rayon's global pool, which frame evaluation uses; every sampling call
/// builds its own pool of [`sampler_threads`](Self::with_sampler_threads) workers.
pub struct AssetLibrary {
    entries: Vec<Entry>,
    opts: SamplerOpts,
    sampler_threads: usize,
    next_ticket: u64,
    revision: u64,
}

impl AssetLibrary {
    /// Empty library sampling with `opts`.
    pub fn new(opts: SamplerOpts) -> Self {
        Self {
            entries: Vec::new(),
            opts,
            sampler_threads: default_sampler_threads(),
            next_ticket: 1,
            revision: 0,
        }
    }

    /// Decode with `threads` workers (clamped to at least one).
    pub fn with_sampler_threads(mut self, threads: usize) -> Self {
        self.sampler_threads = threads.max(1);
        self
    }

    /// Sampler options used for this library.
    pub fn sampler_opts(&self) -> SamplerOpts {
        self.opts
    }

    /// Worker count of the sampling pool.
    pub fn sampler_threads(&self) -> usize {
        self.sampler_threads
    }

    /// Change the sampler options. When they differ, every entry is queued for resampling and
    /// results of batches started under the old options become stale. Entries keep serving their
    /// previous sample until the new one is applied.
    pub fn set_sampler_opts(&mut self, opts: SamplerOpts) {
        if opts == self.opts {
            return;
        }
        self.opts = opts;
        for e in &mut self.entries {
            e.ticket = self.next_ticket;
            self.next_ticket += 1;
            e.state = EntryState::Pending;
        }
        self.revision += 1;
    }

    /// Monotonic change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of entries, including pending and failed ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the library has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in timeline order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Append `source`, or replace the entry with the same id in place. The entry needs sampling.
    pub fn add(&mut self, source: AssetSource) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let entry = Entry {
            id: source.id,
            ticket,
            bytes: source.bytes,
            state: EntryState::Pending,
            sample: None,
        };
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self.revision += 1;
    }

    /// Remove the entry with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Reorder entries to match `ids`, which must be a permutation of the current ids.
    pub fn reorder(&mut self, ids: &[&str]) -> PixmorphResult<()> {
        if ids.len() != self.entries.len() {
            return Err(PixmorphError::configuration(format!(
                "reorder expects {} ids, got {}",
                self.entries.len(),
                ids.len()
            )));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(*id) || !self.entries.iter().any(|e| e.id == *id) {
                return Err(PixmorphError::configuration(format!(
                    "reorder: unknown or duplicate id '{id}'"
                )));
            }
        }
        self.entries.sort_by_key(|e| ids.iter().position(|id| *id == e.id));
        self.revision += 1;
        Ok(())
    }

    /// Requests for every entry waiting on a sample that no batch has picked up yet.
    pub fn pending_requests(&self) -> Vec<SampleRequest> {
        self.entries
            .iter()
            .filter(|e| e.state == EntryState::Pending)
            .map(Entry::request)
            .collect()
    }

    /// [`pending_requests`](Self::pending_requests), marking the entries in flight so later calls
    /// do not request them again. Their results must be passed to [`apply`](Self::apply), or the
    /// entries put back with [`requeue_in_flight`](Self::requeue_in_flight).
    pub fn take_pending_requests(&mut self) -> Vec<SampleRequest> {
        self.entries
            .iter_mut()
            .filter(|e| e.state == EntryState::Pending)
            .map(|e| {
                e.state = EntryState::InFlight;
                e.request()
            })
            .collect()
    }

    /// Return in-flight entries to pending, e.g. after dropping a batch without applying it.
    pub fn requeue_in_flight(&mut self) -> usize {
        let mut n = 0;
        for e in &mut self.entries {
            if e.state == EntryState::InFlight {
                e.state = EntryState::Pending;
                n += 1;
            }
        }
        n
    }

    /// Store a sampling result if its entry is still waiting for it.
    pub fn apply(&mut self, sampled: SampledAsset) -> ApplyOutcome {
        let Some(entry) = self.entries.iter_mut().find(|e| {
            e.id == sampled.id
                && e.ticket == sampled.ticket
                && matches!(e.state, EntryState::Pending | EntryState::InFlight)
        }) else {
            tracing::warn!(id = %sampled.id, ticket = sampled.ticket, "discarding stale sample");
            return ApplyOutcome::Stale;
        };

        self.revision += 1;
        match sampled.result {
            Ok(sample) => {
                entry.state = EntryState::Ready;
                entry.sample = Some(Arc::new(sample));
                ApplyOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(id = %sampled.id, error = %err, "skipping image that failed to sample");
                entry.state = EntryState::Failed;
                entry.sample = None;
                ApplyOutcome::Failed
            }
        }
    }

    /// Sample every pending entry, blocking the caller until all are applied.
    pub fn sample_pending_blocking(&mut self) {
        let opts = self.opts;
        let requests = self.take_pending_requests();
        let results: Vec<_> = match build_sampler_pool(self.sampler_threads) {
            Ok(pool) => pool.install(|| {
                requests
                    .into_par_iter()
                    .map(|req| run_request(req, &opts))
                    .collect()
            }),
            Err(err) => {
                tracing::warn!(error = %err, "sampling on the calling thread");
                requests
                    .into_iter()
                    .map(|req| run_request(req, &opts))
                    .collect()
            }
        };
        for r in results {
            self.apply(r);
        }
    }

    /// Start sampling every pending entry on a background thread and mark them in flight.
    pub fn spawn_sampling(&mut self) -> PixmorphResult<SamplingBatch> {
        let requests = self.take_pending_requests();
        match SamplingBatch::spawn(requests, self.opts, self.sampler_threads) {
            Ok(batch) => Ok(batch),
            Err(err) => {
                self.requeue_in_flight();
                Err(err)
            }
        }
    }

    /// Sampled images in timeline order; entries without a usable sample are skipped.
    pub fn ready_samples(&self) -> Vec<(String, Arc<SourceImageSample>)> {
        self.entries
            .iter()
            .filter_map(|e| e.sample.as_ref().map(|s| (e.id.clone(), Arc::clone(s))))
            .collect()
    }
}

fn build_sampler_pool(threads: usize) -> PixmorphResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("pixmorph-sampler-{i}"))
        .build()
        .map_err(|e| PixmorphError::evaluation(format!("failed to build sampler pool: {e}")))
}

fn run_request(req: SampleRequest, opts: &SamplerOpts) -> SampledAsset {
    SampledAsset {
        result: sample_image(&req.bytes, opts),
        id: req.id,
        ticket: req.ticket,
    }
}

/// Background sampling job reporting one [`SampledAsset`] per request.
///
/// Images are decoded on a dedicated rayon pool driven from its own thread, so neither the render
/// loop nor frame evaluation on the global pool waits for decoding.
pub struct SamplingBatch {
    rx: mpsc::Receiver<SampledAsset>,
    handle: Option<std::thread::JoinHandle<()>>,
    total: usize,
}

impl SamplingBatch {
    /// Spawn the sampling thread with a pool of `threads` decode workers.
    pub fn spawn(
        requests: Vec<SampleRequest>,
        opts: SamplerOpts,
        threads: usize,
    ) -> PixmorphResult<Self> {
        let total = requests.len();
        let pool = build_sampler_pool(threads)?;
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("pixmorph-sampler".to_string())
            .spawn(move || {
                pool.install(|| {
                    requests.into_par_iter().for_each_with(tx, |tx, req| {
                        // Receiver gone means the batch was dropped; nothing left to report to.
                        let _ = tx.send(run_request(req, &opts));
                    });
                });
            })
            .map_err(|e| PixmorphError::io(format!("spawn sampler thread: {e}")))?;
        Ok(Self {
            rx,
            handle: Some(handle),
            total,
        })
    }

    /// Number of requests in this batch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Next finished result, if any, without blocking.
    pub fn try_recv(&self) -> Option<SampledAsset> {
        self.rx.try_recv().ok()
    }

    /// Block until every request has reported and return all results.
    pub fn wait(mut self) -> PixmorphResult<Vec<SampledAsset>> {
        let out: Vec<_> = self.rx.iter().collect();
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| PixmorphError::evaluation("sampler thread panicked"))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
