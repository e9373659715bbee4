//! Sample aggregation across independently timestamped sentences
//!
//! A GGA fix and the orientation sentence describing the same instant arrive
//! on separate lines. [`SampleAggregator`] keeps a single [`PendingSample`],
//! overwrites its fields as sentences are read, and emits a
//! [`TrajectorySample`] the moment every required field has been observed.

use crate::config::{CompletenessPolicy, OrientationSource, TrackOptions};
use crate::conversion::{packed_to_degrees, CoordinatePacking};
use crate::parser::sentence::SentenceParser;
use crate::types::{
    Attitude, FixFields, PackedCoordinate, ParseStats, Sentence, Trajectory, TrajectorySample,
};
use crate::Result;
use std::convert::Infallible;

/// Fields observed since the last emission
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PendingSample {
    pub timestamp: Option<String>,
    pub latitude: Option<PackedCoordinate>,
    pub longitude: Option<PackedCoordinate>,
    pub heading_deg: Option<f64>,
    pub roll_deg: Option<f64>,
    pub pitch_deg: Option<f64>,
}

impl PendingSample {
    pub fn is_empty(&self) -> bool {
        *self == PendingSample::default()
    }

    /// Whether every required field counts as observed under `policy`
    pub fn is_complete(&self, policy: CompletenessPolicy) -> bool {
        match policy {
            CompletenessPolicy::Explicit => {
                self.timestamp.is_some()
                    && self.latitude.is_some()
                    && self.longitude.is_some()
                    && self.heading_deg.is_some()
            }
            CompletenessPolicy::Truthy => {
                let timestamp = self.timestamp.as_deref().map_or(false, |t| !t.is_empty());
                let latitude = self.latitude.map_or(false, |c| c.raw != 0.0);
                let longitude = self.longitude.map_or(false, |c| c.raw != 0.0);
                let heading = self.heading_deg.map_or(false, |h| h != 0.0);
                timestamp && latitude && longitude && heading
            }
        }
    }

    fn apply_fix(&mut self, fix: FixFields) {
        self.timestamp = Some(fix.timestamp);
        self.latitude = Some(fix.latitude);
        self.longitude = Some(fix.longitude);
    }

    fn apply_heading(&mut self, heading_deg: f64) {
        self.heading_deg = Some(heading_deg);
    }

    fn apply_attitude(&mut self, attitude: Attitude) {
        self.roll_deg = Some(attitude.roll_deg);
        self.pitch_deg = Some(attitude.pitch_deg);
        self.heading_deg = Some(attitude.heading_deg);
    }

    /// Convert to a sample and reset to empty, if complete
    fn take_complete(
        &mut self,
        policy: CompletenessPolicy,
        packing: CoordinatePacking,
        apply_hemisphere: bool,
    ) -> Option<TrajectorySample> {
        if !self.is_complete(policy) {
            return None;
        }

        let pending = std::mem::take(self);
        Some(TrajectorySample {
            timestamp: pending.timestamp?,
            latitude_deg: packed_to_degrees(&pending.latitude?, packing, apply_hemisphere),
            longitude_deg: packed_to_degrees(&pending.longitude?, packing, apply_hemisphere),
            heading_deg: pending.heading_deg?,
            roll_deg: pending.roll_deg,
            pitch_deg: pending.pitch_deg,
        })
    }
}

/// What a single line did to the aggregator
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// No supported pattern, or the inactive orientation family
    Ignored,
    /// A pattern matched but a field failed to decode; nothing was updated
    Malformed(String),
    /// Pending fields were overwritten, sample still incomplete
    Updated,
    /// The line completed a sample
    Emitted(TrajectorySample),
}

/// Push-style aggregator holding one pending sample
#[derive(Debug, Clone)]
pub struct SampleAggregator {
    parser: SentenceParser,
    pending: PendingSample,
    orientation_source: OrientationSource,
    completeness: CompletenessPolicy,
    packing: CoordinatePacking,
    apply_hemisphere: bool,
    stats: ParseStats,
    debug: bool,
}

impl SampleAggregator {
    pub fn new(options: &TrackOptions, debug: bool) -> Result<Self> {
        Ok(Self {
            parser: SentenceParser::new()?,
            pending: PendingSample::default(),
            orientation_source: options.orientation_source,
            completeness: options.completeness,
            packing: options.packing,
            apply_hemisphere: options.apply_hemisphere,
            stats: ParseStats::default(),
            debug,
        })
    }

    pub fn pending(&self) -> &PendingSample {
        &self.pending
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Feed one line, emitting a sample if it completed one
    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        self.stats.total_lines += 1;

        let sentence = match self.parser.parse_line(line) {
            Ok(Some(sentence)) => sentence,
            Ok(None) => {
                self.stats.ignored_lines += 1;
                return LineOutcome::Ignored;
            }
            Err(e) => {
                self.stats.malformed_lines += 1;
                if self.debug {
                    println!(
                        "DEBUG: skipping malformed line {}: {}",
                        self.stats.total_lines, e
                    );
                }
                return LineOutcome::Malformed(e.to_string());
            }
        };

        match (sentence, self.orientation_source) {
            (Sentence::Fix(fix), _) => {
                self.stats.fix_sentences += 1;
                self.pending.apply_fix(fix);
            }
            (Sentence::TrueHeading { heading_deg }, OrientationSource::Hdt) => {
                self.stats.orientation_sentences += 1;
                self.pending.apply_heading(heading_deg);
            }
            (Sentence::Attitude(attitude), OrientationSource::Prdid) => {
                self.stats.orientation_sentences += 1;
                self.pending.apply_attitude(attitude);
            }
            (other, source) => {
                self.stats.ignored_lines += 1;
                if self.debug {
                    println!(
                        "DEBUG: ignoring {} on line {} (orientation source is {:?})",
                        other.identifier(),
                        self.stats.total_lines,
                        source
                    );
                }
                return LineOutcome::Ignored;
            }
        }

        match self
            .pending
            .take_complete(self.completeness, self.packing, self.apply_hemisphere)
        {
            Some(sample) => {
                self.stats.samples_emitted += 1;
                if self.debug {
                    println!(
                        "DEBUG: sample {} at {} - lat: {:.7}, lon: {:.7}, heading: {:.2}",
                        self.stats.samples_emitted,
                        sample.timestamp,
                        sample.latitude_deg,
                        sample.longitude_deg,
                        sample.heading_deg
                    );
                }
                LineOutcome::Emitted(sample)
            }
            None => LineOutcome::Updated,
        }
    }

    /// Consume the aggregator, returning the trajectory of all lines
    pub fn process_lines<I, S>(self, lines: I) -> Trajectory
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.try_process_lines(lines.into_iter().map(Ok::<S, Infallible>)) {
            Ok(trajectory) => trajectory,
            Err(never) => match never {},
        }
    }

    /// Like [`SampleAggregator::process_lines`] for sources whose reads can fail
    ///
    /// Stops at the first read error and returns it.
    pub fn try_process_lines<I, S, E>(mut self, lines: I) -> std::result::Result<Trajectory, E>
    where
        I: IntoIterator<Item = std::result::Result<S, E>>,
        S: AsRef<str>,
    {
        let mut samples = Vec::new();
        for line in lines {
            if let LineOutcome::Emitted(sample) = self.push_line(line?.as_ref()) {
                samples.push(sample);
            }
        }

        if self.debug && !self.pending.is_empty() {
            println!("DEBUG: discarding incomplete trailing sample: {:?}", self.pending);
        }

        Ok(Trajectory {
            samples,
            stats: self.stats,
        })
    }
}
