//! Frame sources and the per-frame orchestrator.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{GrayImage, ImageReader, RgbImage};
use log::{debug, info, warn};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::coin::{CoinDetector, CoinResult};
use crate::config::MetrologyConfig;
use crate::metrology::{compute_measurements, MeasurementBundle};
use crate::pipeline::{BorderFollowing, CannyEdgeDetector, ContourExtractor, EdgeDetector};
use crate::rect::{RectangleDetector, RectangleResult};
use crate::scene::{compose_scene, SceneCommand};
use crate::{AcquisitionError, AppError};

/// Blocking source of color frames.
///
/// [`MetrologyApp::run`] measures each read and rejects a frame that arrives
/// after `acquisition.read_timeout_ms`, but only once `next_frame` has
/// returned: a read that never returns is not interrupted. Sources that can
/// block indefinitely (capture devices, network streams) must enforce their
/// own deadline and report it as [`AcquisitionError::Timeout`].
pub trait FrameSource {
    /// Next frame, or `Ok(None)` at end of stream. A failed read consumes the
    /// frame: retrying moves on to the next one.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AcquisitionError>;

    /// Human-readable name of the frame last returned.
    fn frame_label(&self) -> Option<String> {
        None
    }
}

/// Ordered list of image files.
#[derive(Clone, Debug, Default)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequence {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, next: 0 }
    }

    /// Files are taken as given; directories contribute their image files
    /// sorted by name.
    pub fn from_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Self, AcquisitionError> {
        let mut paths = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            if !input.is_dir() {
                paths.push(input.to_path_buf());
                continue;
            }
            let io_err = |source| AcquisitionError::Io {
                path: input.to_path_buf(),
                source,
            };
            let mut found = Vec::new();
            for entry in std::fs::read_dir(input).map_err(io_err)? {
                let path = entry.map_err(io_err)?.path();
                if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
                    found.push(path);
                }
            }
            found.sort();
            debug!("{}: {} image files", input.display(), found.len());
            paths.extend(found);
        }
        Ok(Self::new(paths))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AcquisitionError> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| AcquisitionError::Io {
                path: path.clone(),
                source,
            })?;
        let img = reader.decode().map_err(|source| AcquisitionError::Decode {
            path: path.clone(),
            source,
        })?;
        Ok(Some(img.to_rgb8()))
    }

    fn frame_label(&self) -> Option<String> {
        let idx = self.next.checked_sub(1)?;
        self.paths.get(idx).map(|p| p.display().to_string())
    }
}

/// Everything measured on one frame.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub index: usize,
    pub source: Option<String>,
    pub width: u32,
    pub height: u32,
    pub contour_count: usize,
    pub coin: CoinResult,
    pub rectangle: RectangleResult,
    pub measurements: MeasurementBundle,
    pub scene: Vec<SceneCommand>,
}

/// Runs edge detection, contour extraction, both classifiers, and the
/// metrology on every frame of a source. Nothing is carried from one frame
/// to the next.
pub struct MetrologyApp<S: FrameSource> {
    source: S,
    config: MetrologyConfig,
    edges: Box<dyn EdgeDetector>,
    extractor: Box<dyn ContourExtractor>,
    coin: CoinDetector,
    rectangle: RectangleDetector,
}

impl<S: FrameSource> MetrologyApp<S> {
    pub fn new(source: S, config: MetrologyConfig) -> Self {
        Self {
            edges: Box::new(CannyEdgeDetector::new(config.edges.clone())),
            extractor: Box::new(BorderFollowing),
            coin: CoinDetector::new(config.coin.clone()),
            rectangle: RectangleDetector::new(config.rectangle.clone()),
            source,
            config,
        }
    }

    /// Replace the default Canny preprocessing.
    pub fn with_edge_detector(mut self, edges: impl EdgeDetector + 'static) -> Self {
        self.edges = Box::new(edges);
        self
    }

    /// Replace the default border-following contour extraction.
    pub fn with_contour_extractor(mut self, extractor: impl ContourExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &MetrologyConfig {
        &self.config
    }

    /// Measure a single frame.
    pub fn process_frame(&self, frame: &RgbImage) -> FrameReport {
        self.analyze(frame).0
    }

    /// Like [`Self::process_frame`], also returning the edge mask.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width(), height = frame.height()))
    )]
    pub fn analyze(&self, frame: &RgbImage) -> (FrameReport, GrayImage) {
        let (width, height) = frame.dimensions();
        let nominal = &self.config.capture;
        if (width, height) != (nominal.width, nominal.height) {
            debug!(
                "frame is {width}x{height}, nominal capture is {}x{}",
                nominal.width, nominal.height
            );
        }

        let mask = self.edges.edge_mask(frame);
        let contours = self.extractor.external_contours(&mask);
        let coin = self.coin.detect(&contours);
        let rectangle = self.rectangle.detect(&contours);
        let measurements = compute_measurements(&coin, &rectangle, &self.config.camera);
        let scene = compose_scene(
            &coin,
            &rectangle,
            &measurements,
            (width, height),
            Some(mask.dimensions()),
        );

        let report = FrameReport {
            index: 0,
            source: None,
            width,
            height,
            contour_count: contours.len(),
            coin,
            rectangle,
            measurements,
            scene,
        };
        (report, mask)
    }

    /// Process frames until the source ends, handing each report and edge
    /// mask to `sink`. Returns the number of frames delivered.
    ///
    /// Failed or slow reads are retried with exponential backoff (the read
    /// timeout is checked after the source returns; see [`FrameSource`]); after
    /// `max_retries` consecutive failures the run stops with
    /// [`AcquisitionError::Exhausted`].
    pub fn run<F>(&mut self, mut sink: F) -> Result<usize, AppError>
    where
        F: FnMut(FrameReport, &GrayImage) -> Result<(), AppError>,
    {
        let acq = self.config.acquisition.clone();
        let mut delivered = 0usize;
        let mut failures = 0u32;

        loop {
            let started = Instant::now();
            let read = self.source.next_frame().and_then(|frame| {
                let elapsed = started.elapsed();
                match acq.read_timeout() {
                    Some(limit) if frame.is_some() && elapsed > limit => {
                        Err(AcquisitionError::Timeout {
                            elapsed_ms: elapsed.as_millis() as u64,
                            limit_ms: limit.as_millis() as u64,
                        })
                    }
                    _ => Ok(frame),
                }
            });

            match read {
                Ok(Some(frame)) => {
                    failures = 0;
                    let (mut report, mask) = self.analyze(&frame);
                    report.index = delivered;
                    report.source = self.source.frame_label();
                    debug!(
                        "frame {delivered}: {} contours, coin={}, rectangle={}",
                        report.contour_count, report.coin.found, report.rectangle.found
                    );
                    sink(report, &mask)?;
                    delivered += 1;
                }
                Ok(None) => break,
                Err(err) => {
                    failures += 1;
                    if failures > acq.max_retries {
                        return Err(AcquisitionError::Exhausted {
                            attempts: failures,
                            last: Box::new(err),
                        }
                        .into());
                    }
                    let wait = acq.backoff(failures);
                    warn!(
                        "frame read failed ({failures}/{}): {err}; retrying in {} ms",
                        acq.max_retries,
                        wait.as_millis()
                    );
                    std::thread::sleep(wait);
                }
            }
        }

        info!("processed {delivered} frames");
        Ok(delivered)
    }
}
