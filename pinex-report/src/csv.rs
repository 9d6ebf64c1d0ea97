//! CSV serialization of summary rows.
//!
//! The writer does no quoting or escaping. That is safe only because every
//! field is numeric or drawn from the closed condition enumeration; if a
//! free-text column is ever added, this writer must grow proper escaping
//! first.

use crate::aggregate::SummaryRow;

pub const CSV_HEADER: &str = "Participant,Condition,CorrectAttempts,TotalAttempts,SuccessRate,\
MentalDemand,PhysicalDemand,TemporalDemand,Performance,Effort,Frustration";

/// Header plus one comma-joined line per row, `\n`-separated. Success rate
/// prints with exactly two decimals; an absent questionnaire leaves its six
/// fields empty.
pub fn to_csv(rows: &[SummaryRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{:.2},{}",
            row.participant,
            row.condition,
            row.correct_attempts,
            row.total_attempts,
            row.success_rate,
            workload_fields(row),
        ));
    }
    out
}

fn workload_fields(row: &SummaryRow) -> String {
    match &row.workload {
        Some(w) => format!(
            "{},{},{},{},{},{}",
            w.mental_demand,
            w.physical_demand,
            w.temporal_demand,
            w.performance,
            w.effort,
            w.frustration
        ),
        None => ",,,,,".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinex_core::{Condition, ParticipantId, SessionCondition, WorkloadRatings};

    fn row(workload: Option<WorkloadRatings>) -> SummaryRow {
        SummaryRow {
            participant: ParticipantId::new(1).expect("valid id"),
            condition: SessionCondition::Measured(Condition::NormalKeypad),
            correct_attempts: 1,
            total_attempts: 1,
            success_rate: 1.0,
            workload,
        }
    }

    #[test]
    fn header_only_for_no_rows() {
        assert_eq!(to_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn missing_questionnaire_serializes_as_empty_fields() {
        let csv = to_csv(&[row(None)]);
        let expected = format!("{CSV_HEADER}\n1,normal-keypad,1,1,1.00,,,,,,");
        assert_eq!(csv, expected);
    }

    #[test]
    fn workload_fields_follow_the_fixed_column_order() {
        let csv = to_csv(&[row(Some(WorkloadRatings {
            mental_demand: 10,
            physical_demand: 20,
            temporal_demand: 30,
            performance: 40,
            effort: 60,
            frustration: 70,
        }))]);
        let expected = format!("{CSV_HEADER}\n1,normal-keypad,1,1,1.00,10,20,30,40,60,70");
        assert_eq!(csv, expected);
    }

    #[test]
    fn every_line_has_eleven_fields() {
        let csv = to_csv(&[row(None), row(Some(WorkloadRatings::default()))]);
        for line in csv.lines() {
            assert_eq!(line.split(',').count(), 11, "{line}");
        }
    }

    #[test]
    fn success_rate_prints_with_two_decimals() {
        let mut partial = row(None);
        partial.correct_attempts = 2;
        partial.total_attempts = 3;
        partial.success_rate = 0.67;
        let csv = to_csv(&[partial]);
        assert!(csv.ends_with("2,3,0.67,,,,,,"));
    }
}
