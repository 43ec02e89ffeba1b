//! Letter analysis and indicator classification
//!
//! Threshold rules that turn stroke geometry into per-stroke findings and a
//! short list of qualitative indicators. These are screening heuristics; each
//! rule is evaluated independently of the others.

use super::geometry;
use super::scoring::DrawingMetrics;
use super::segmentation::Stroke;
use super::spacing::SpacingAnalysis;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Minimum points before a stroke is checked for reversal or inversion
pub const MIN_POINTS_FOR_DIRECTION: usize = 3;

/// Minimum points before a stroke is checked for substitution
pub const MIN_POINTS_FOR_SUBSTITUTION: usize = 5;

/// Vertical movement per point below which a stroke counts as inverted
pub const INVERSION_THRESHOLD: f64 = -0.5;

/// Complexity above which a stroke (or the whole drawing) is flagged
pub const COMPLEXITY_THRESHOLD: f64 = 0.8;

/// Word-spacing consistency below which spacing is flagged
pub const SPACING_CONSISTENCY_THRESHOLD: f64 = 60.0;

/// More reversal findings than this escalate severity to moderate
pub const REVERSAL_ESCALATION_COUNT: usize = 2;

/// Fraction of the expected stroke count below which omissions are reported
pub const OMISSION_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversalKind {
    #[serde(rename = "backward_movement")]
    BackwardMovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InversionKind {
    #[serde(rename = "upward_movement")]
    UpwardMovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OmissionKind {
    #[serde(rename = "insufficient_strokes")]
    InsufficientStrokes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubstitutionKind {
    #[serde(rename = "high_complexity")]
    HighComplexity,
}

/// A stroke whose net horizontal travel runs backwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reversal {
    pub stroke_index: usize,
    pub direction: f64,
    #[serde(rename = "type")]
    pub kind: ReversalKind,
}

/// A stroke drawn predominantly upwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inversion {
    pub stroke_index: usize,
    pub vertical_movement: f64,
    #[serde(rename = "type")]
    pub kind: InversionKind,
}

/// Fewer strokes than the reference text suggests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Omission {
    pub expected: f64,
    pub actual: usize,
    #[serde(rename = "type")]
    pub kind: OmissionKind,
}

/// A stroke with an unusually high share of sharp turns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub stroke_index: usize,
    pub complexity: f64,
    #[serde(rename = "type")]
    pub kind: SubstitutionKind,
}

/// Per-stroke letter formation findings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LetterAnalysis {
    pub reversals: Vec<Reversal>,
    pub inversions: Vec<Inversion>,
    pub omissions: Vec<Omission>,
    pub substitutions: Vec<Substitution>,
}

impl LetterAnalysis {
    pub fn analyze(strokes: &[Stroke], reference_text: &str) -> Self {
        Self {
            reversals: detect_reversals(strokes),
            inversions: detect_inversions(strokes),
            omissions: detect_omissions(strokes, reference_text),
            substitutions: detect_substitutions(strokes),
        }
    }
}

pub fn detect_reversals(strokes: &[Stroke]) -> Vec<Reversal> {
    strokes
        .iter()
        .enumerate()
        .filter(|(_, s)| s.point_count() >= MIN_POINTS_FOR_DIRECTION)
        .filter_map(|(stroke_index, s)| {
            let direction = s.direction();
            (direction.abs() > FRAC_PI_2).then_some(Reversal {
                stroke_index,
                direction,
                kind: ReversalKind::BackwardMovement,
            })
        })
        .collect()
}

pub fn detect_inversions(strokes: &[Stroke]) -> Vec<Inversion> {
    strokes
        .iter()
        .enumerate()
        .filter(|(_, s)| s.point_count() >= MIN_POINTS_FOR_DIRECTION)
        .filter_map(|(stroke_index, s)| {
            let vertical_movement = s.vertical_movement();
            (vertical_movement < INVERSION_THRESHOLD).then_some(Inversion {
                stroke_index,
                vertical_movement,
                kind: InversionKind::UpwardMovement,
            })
        })
        .collect()
}

/// Rough stroke budget for a reference text: half a stroke per UTF-16 code unit, at least five
pub fn expected_stroke_count(reference_text: &str) -> f64 {
    (reference_text.encode_utf16().count() as f64 * 0.5).max(5.0)
}

pub fn detect_omissions(strokes: &[Stroke], reference_text: &str) -> Vec<Omission> {
    let expected = expected_stroke_count(reference_text);
    if (strokes.len() as f64) < expected * OMISSION_RATIO {
        vec![Omission {
            expected,
            actual: strokes.len(),
            kind: OmissionKind::InsufficientStrokes,
        }]
    } else {
        Vec::new()
    }
}

pub fn detect_substitutions(strokes: &[Stroke]) -> Vec<Substitution> {
    strokes
        .iter()
        .enumerate()
        .filter(|(_, s)| s.point_count() >= MIN_POINTS_FOR_SUBSTITUTION)
        .filter_map(|(stroke_index, s)| {
            let complexity = geometry::stroke_complexity(s);
            (complexity > COMPLEXITY_THRESHOLD).then_some(Substitution {
                stroke_index,
                complexity,
                kind: SubstitutionKind::HighComplexity,
            })
        })
        .collect()
}

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Reversals,
    Inversions,
    Omissions,
    Substitutions,
    Spacing,
    Complexity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
}

/// A qualitative finding for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub severity: Severity,
    pub description: String,
    pub details: Vec<String>,
}

/// Apply the indicator rules to the letter, spacing and drawing analyses
pub fn classify(
    letters: &LetterAnalysis,
    spacing: &SpacingAnalysis,
    metrics: &DrawingMetrics,
) -> Vec<Indicator> {
    let mut indicators = Vec::new();

    if !letters.reversals.is_empty() {
        let count = letters.reversals.len();
        indicators.push(Indicator {
            kind: IndicatorKind::Reversals,
            severity: if count > REVERSAL_ESCALATION_COUNT {
                Severity::Moderate
            } else {
                Severity::Mild
            },
            description: format!("{count} reversal pattern(s) detected"),
            details: letters
                .reversals
                .iter()
                .map(|r| format!("Backward movement in stroke {}", r.stroke_index))
                .collect(),
        });
    }

    if !letters.inversions.is_empty() {
        indicators.push(Indicator {
            kind: IndicatorKind::Inversions,
            severity: Severity::Moderate,
            description: format!("{} inversion pattern(s) detected", letters.inversions.len()),
            details: letters
                .inversions
                .iter()
                .map(|i| format!("Upward movement in stroke {}", i.stroke_index))
                .collect(),
        });
    }

    if let Some(omission) = letters.omissions.first() {
        indicators.push(Indicator {
            kind: IndicatorKind::Omissions,
            severity: Severity::Mild,
            description: "Fewer strokes than expected for the text".to_string(),
            details: vec![format!(
                "Expected about {} strokes, found {}",
                omission.expected, omission.actual
            )],
        });
    }

    if !letters.substitutions.is_empty() {
        indicators.push(Indicator {
            kind: IndicatorKind::Substitutions,
            severity: Severity::Mild,
            description: format!(
                "{} substitution pattern(s) detected",
                letters.substitutions.len()
            ),
            details: letters
                .substitutions
                .iter()
                .map(|s| format!("High complexity in stroke {}", s.stroke_index))
                .collect(),
        });
    }

    if spacing.word_spacing.consistency < SPACING_CONSISTENCY_THRESHOLD {
        indicators.push(Indicator {
            kind: IndicatorKind::Spacing,
            severity: Severity::Mild,
            description: "Inconsistent spacing patterns detected".to_string(),
            details: vec!["Variable spacing between strokes".to_string()],
        });
    }

    if metrics.complexity > COMPLEXITY_THRESHOLD {
        indicators.push(Indicator {
            kind: IndicatorKind::Complexity,
            severity: Severity::Mild,
            description: "High drawing complexity detected".to_string(),
            details: vec!["Complex stroke patterns may indicate formation difficulties".to_string()],
        });
    }

    indicators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::spacing::{GapStats, LineSpacingStats};
    use crate::capture::types::Point;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect(), 0, 10)
    }

    fn steady_spacing() -> SpacingAnalysis {
        let stats = GapStats {
            average_gap: 10.0,
            gap_count: 3,
            consistency: 90.0,
        };
        SpacingAnalysis {
            word_spacing: stats,
            letter_spacing: stats,
            line_spacing: LineSpacingStats {
                line_count: 1,
                average_line_height: 0.0,
                consistency: 100.0,
            },
        }
    }

    fn calm_metrics() -> DrawingMetrics {
        DrawingMetrics {
            total_strokes: 10,
            drawing_time: 5.0,
            complexity: 0.1,
            pressure_variation: 0.9,
            speed_variation: 0.9,
        }
    }

    fn backward() -> Stroke {
        stroke(&[(30.0, 0.0), (20.0, 0.0), (10.0, 0.0)])
    }

    #[test]
    fn test_reversal_detection() {
        let forward = stroke(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let short_backward = stroke(&[(10.0, 0.0), (0.0, 0.0)]);
        let reversals = detect_reversals(&[forward, backward(), short_backward]);

        assert_eq!(reversals.len(), 1);
        assert_eq!(reversals[0].stroke_index, 1);
        assert_eq!(reversals[0].kind, ReversalKind::BackwardMovement);
    }

    #[test]
    fn test_straight_down_is_not_a_reversal() {
        let down = stroke(&[(0.0, 0.0), (0.0, 10.0), (0.0, 20.0)]);
        assert!(detect_reversals(&[down]).is_empty());
    }

    #[test]
    fn test_inversion_detection() {
        // 30px up over 3 points = -10 per point
        let up = stroke(&[(0.0, 30.0), (0.0, 15.0), (0.0, 0.0)]);
        // 1px up over 3 points stays above the threshold
        let flat = stroke(&[(0.0, 1.0), (5.0, 0.5), (10.0, 0.0)]);
        let inversions = detect_inversions(&[flat, up]);

        assert_eq!(inversions.len(), 1);
        assert_eq!(inversions[0].stroke_index, 1);
        assert_eq!(inversions[0].vertical_movement, -10.0);
    }

    #[test]
    fn test_expected_stroke_count() {
        assert_eq!(expected_stroke_count(""), 5.0);
        assert_eq!(expected_stroke_count("cat"), 5.0);
        assert_eq!(expected_stroke_count("the quick brown"), 7.5);
        assert_eq!(expected_stroke_count("ñandú ñandú"), 5.5);
        // astral-plane characters count as two units each
        assert_eq!(expected_stroke_count(&"\u{1F600}".repeat(12)), 12.0);
    }

    #[test]
    fn test_omission_detection() {
        let strokes: Vec<Stroke> = (0..2).map(|_| stroke(&[(0.0, 0.0)])).collect();
        let omissions = detect_omissions(&strokes, "hello");
        assert_eq!(omissions.len(), 1);
        assert_eq!(omissions[0].expected, 5.0);
        assert_eq!(omissions[0].actual, 2);

        let strokes: Vec<Stroke> = (0..3).map(|_| stroke(&[(0.0, 0.0)])).collect();
        assert!(detect_omissions(&strokes, "hello").is_empty());
    }

    #[test]
    fn test_substitution_detection() {
        let zigzag = stroke(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0), (40.0, 0.0)]);
        let short_zigzag = stroke(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0)]);
        let subs = detect_substitutions(&[short_zigzag, zigzag]);

        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].stroke_index, 1);
        assert_eq!(subs[0].complexity, 1.0);
    }

    #[test]
    fn test_finding_wire_format() {
        let reversal = Reversal {
            stroke_index: 3,
            direction: 3.0,
            kind: ReversalKind::BackwardMovement,
        };
        let json = serde_json::to_string(&reversal).unwrap();
        assert_eq!(json, r#"{"strokeIndex":3,"direction":3.0,"type":"backward_movement"}"#);

        let omission = Omission {
            expected: 5.0,
            actual: 1,
            kind: OmissionKind::InsufficientStrokes,
        };
        let json = serde_json::to_string(&omission).unwrap();
        assert_eq!(json, r#"{"expected":5.0,"actual":1,"type":"insufficient_strokes"}"#);
    }

    #[test]
    fn test_classify_nothing_to_report() {
        let indicators = classify(&LetterAnalysis::default(), &steady_spacing(), &calm_metrics());
        assert!(indicators.is_empty());
    }

    #[test]
    fn test_reversal_severity_escalates() {
        let letters = LetterAnalysis {
            reversals: detect_reversals(&[backward(), backward()]),
            ..Default::default()
        };
        let indicators = classify(&letters, &steady_spacing(), &calm_metrics());
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].kind, IndicatorKind::Reversals);
        assert_eq!(indicators[0].severity, Severity::Mild);
        assert_eq!(indicators[0].details[1], "Backward movement in stroke 1");

        let letters = LetterAnalysis {
            reversals: detect_reversals(&[backward(), backward(), backward()]),
            ..Default::default()
        };
        let indicators = classify(&letters, &steady_spacing(), &calm_metrics());
        assert_eq!(indicators[0].severity, Severity::Moderate);
        assert_eq!(indicators[0].description, "3 reversal pattern(s) detected");
    }

    #[test]
    fn test_inversions_are_moderate() {
        let up = stroke(&[(0.0, 30.0), (0.0, 15.0), (0.0, 0.0)]);
        let letters = LetterAnalysis {
            inversions: detect_inversions(&[up]),
            ..Default::default()
        };
        let indicators = classify(&letters, &steady_spacing(), &calm_metrics());
        assert_eq!(indicators[0].kind, IndicatorKind::Inversions);
        assert_eq!(indicators[0].severity, Severity::Moderate);
        assert_eq!(indicators[0].details, vec!["Upward movement in stroke 0".to_string()]);
    }

    #[test]
    fn test_spacing_and_complexity_indicators() {
        let mut spacing = steady_spacing();
        spacing.word_spacing.consistency = 59.9;
        let mut metrics = calm_metrics();
        metrics.complexity = 0.81;

        let indicators = classify(&LetterAnalysis::default(), &spacing, &metrics);
        let kinds: Vec<IndicatorKind> = indicators.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IndicatorKind::Spacing, IndicatorKind::Complexity]);
        assert!(indicators.iter().all(|i| i.severity == Severity::Mild));
    }

    #[test]
    fn test_omission_and_substitution_indicators() {
        let zigzag = stroke(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0), (40.0, 0.0)]);
        let letters = LetterAnalysis::analyze(&[zigzag], "hello world");
        let indicators = classify(&letters, &steady_spacing(), &calm_metrics());
        let kinds: Vec<IndicatorKind> = indicators.iter().map(|i| i.kind).collect();

        assert_eq!(kinds, vec![IndicatorKind::Omissions, IndicatorKind::Substitutions]);
        assert_eq!(indicators[0].details, vec!["Expected about 5.5 strokes, found 1".to_string()]);
    }

    #[test]
    fn test_indicator_wire_format() {
        let indicator = Indicator {
            kind: IndicatorKind::Spacing,
            severity: Severity::Mild,
            description: "d".to_string(),
            details: vec![],
        };
        let json = serde_json::to_string(&indicator).unwrap();
        assert_eq!(json, r#"{"type":"spacing","severity":"mild","description":"d","details":[]}"#);
    }
}
