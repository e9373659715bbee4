//! Export filtering for keyframes and trajectories
//!
//! The projection produces non-finite coordinates near 90° of longitude from
//! the origin instead of failing. These helpers let callers reject such
//! keyframes downstream and skip logs that produced no trajectory at all.

use crate::types::{Keyframe, Trajectory};

/// True when every position and rotation component is finite
pub fn is_finite_keyframe(keyframe: &Keyframe) -> bool {
    keyframe.position.is_finite() && keyframe.rotation.is_finite()
}

/// Remove non-finite keyframes in place
///
/// Frame indices of the remaining keyframes are left untouched, so a dropped
/// keyframe leaves a gap rather than shifting later frames.
///
/// # Returns
/// The number of keyframes removed
pub fn retain_finite_keyframes(keyframes: &mut Vec<Keyframe>) -> usize {
    let before = keyframes.len();
    keyframes.retain(is_finite_keyframe);
    before - keyframes.len()
}

/// Determines if a trajectory should be skipped for export
///
/// # Arguments
/// * `trajectory` - The parsed trajectory to evaluate
/// * `force_export` - If true, never skips
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_export(trajectory: &Trajectory, force_export: bool) -> (bool, String) {
    if force_export {
        return (false, String::new());
    }

    let stats = &trajectory.stats;
    if trajectory.is_empty() {
        if stats.fix_sentences == 0 {
            return (
                true,
                format!("no position fixes in {} lines", stats.total_lines),
            );
        }
        if stats.orientation_sentences == 0 {
            return (
                true,
                format!(
                    "{} position fixes but no orientation sentences from the selected source",
                    stats.fix_sentences
                ),
            );
        }
        return (true, "no complete samples".to_string());
    }

    (false, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParseStats, Position, Rotation, TrajectorySample};

    fn keyframe(x: f64, heading_rad: f64) -> Keyframe {
        Keyframe {
            frame_index: 0,
            position: Position { x, y: 0.0, z: 0.0 },
            rotation: Rotation {
                heading_rad,
                ..Rotation::default()
            },
        }
    }

    #[test]
    fn test_retain_finite_keyframes() {
        let mut keyframes = vec![
            keyframe(1.0, 0.0),
            keyframe(f64::INFINITY, 0.0),
            keyframe(2.0, f64::NAN),
            keyframe(3.0, 0.5),
        ];
        let removed = retain_finite_keyframes(&mut keyframes);
        assert_eq!(removed, 2);
        assert_eq!(keyframes.len(), 2);
        assert!(keyframes.iter().all(is_finite_keyframe));
    }

    #[test]
    fn test_skip_empty_trajectory() {
        let trajectory = Trajectory {
            samples: Vec::new(),
            stats: ParseStats {
                total_lines: 10,
                ignored_lines: 10,
                ..ParseStats::default()
            },
        };
        let (skip, reason) = should_skip_export(&trajectory, false);
        assert!(skip);
        assert!(reason.contains("no position fixes"));

        let (skip, _) = should_skip_export(&trajectory, true);
        assert!(!skip);
    }

    #[test]
    fn test_skip_fixes_without_orientation() {
        let trajectory = Trajectory {
            samples: Vec::new(),
            stats: ParseStats {
                total_lines: 4,
                fix_sentences: 4,
                ..ParseStats::default()
            },
        };
        let (skip, reason) = should_skip_export(&trajectory, false);
        assert!(skip);
        assert!(reason.contains("no orientation"));
    }

    #[test]
    fn test_keep_non_empty_trajectory() {
        let trajectory = Trajectory {
            samples: vec![TrajectorySample {
                timestamp: "120000.00".to_string(),
                latitude_deg: 48.0,
                longitude_deg: 11.0,
                heading_deg: 90.0,
                roll_deg: None,
                pitch_deg: None,
            }],
            stats: ParseStats::default(),
        };
        assert_eq!(should_skip_export(&trajectory, false), (false, String::new()));
    }
}
