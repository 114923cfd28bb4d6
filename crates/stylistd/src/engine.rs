use rand::rngs::StdRng;
use rand::SeedableRng;
use stylist_core::sampling::{self, SamplingError};
use stylist_core::{Classification, ClassifyError, ColorVoter};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("sampling error: {0}")]
    Sampling(#[from] SamplingError),
    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),
    #[error("analysis thread exited")]
    ChannelClosed,
}

/// Result of a lip analysis.
#[derive(Debug)]
pub struct LipResult {
    pub classification: Classification,
    /// Unmasked pixels found in the crop before sampling.
    pub pixels: usize,
}

/// Messages sent from D-Bus handlers to the analysis thread.
enum EngineRequest {
    ClassifyLip {
        image: Vec<u8>,
        reply: oneshot::Sender<Result<LipResult, EngineError>>,
    },
}

/// Clone-safe handle to the analysis thread.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    /// Request lip analysis: decode, sample unmasked pixels, vote.
    pub async fn classify_lip(&self, image: Vec<u8>) -> Result<LipResult, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::ClassifyLip {
                image,
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        reply_rx.await.map_err(|_| EngineError::ChannelClosed)?
    }
}

/// Spawn the analysis engine on a dedicated OS thread.
///
/// Image decoding is CPU-bound, so it stays off the async runtime. The
/// thread owns the sampling RNG; a fixed seed makes results reproducible.
pub fn spawn_engine(sample_size: usize, seed: Option<u64>) -> std::io::Result<EngineHandle> {
    let mut rng = match seed {
        Some(seed) => {
            tracing::info!(seed, "sampling with fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let (tx, mut rx) = mpsc::channel::<EngineRequest>(4);

    std::thread::Builder::new()
        .name("stylist-analysis".into())
        .spawn(move || {
            tracing::info!(sample_size, "analysis thread started");
            let voter = ColorVoter::default();
            while let Some(req) = rx.blocking_recv() {
                match req {
                    EngineRequest::ClassifyLip { image, reply } => {
                        let result = run_lip(&voter, &image, sample_size, &mut rng);
                        let _ = reply.send(result);
                    }
                }
            }
            tracing::info!("analysis thread exiting");
        })?;

    Ok(EngineHandle { tx })
}

fn run_lip(
    voter: &ColorVoter<'_>,
    image: &[u8],
    sample_size: usize,
    rng: &mut StdRng,
) -> Result<LipResult, EngineError> {
    let pixels = sampling::pixels_from_bytes(image)?;
    let samples = sampling::sample(&pixels, sample_size, rng);
    let classification = voter.classify(&samples)?;

    tracing::info!(
        pixels = pixels.len(),
        sampled = samples.len(),
        season = %classification.season,
        "lip analysis complete"
    );

    Ok(LipResult {
        classification,
        pixels: pixels.len(),
    })
}
