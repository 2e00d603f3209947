use crate::formatter::*;

/// One record per proposal: `Rank,Proposal,Score,MajorityGrade,SecondMajorityGrade`.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, d: &Deliberation, options: &Options) -> TallyResult<String> {
        let mut records = vec![vec![
            "Rank".to_string(),
            "Proposal".to_string(),
            "Score".to_string(),
            "MajorityGrade".to_string(),
            "SecondMajorityGrade".to_string(),
        ]];
        for proposal_result in d.ordered_results(options) {
            records.push(vec![
                proposal_result.rank.to_string(),
                d.proposal_name(proposal_result.index)?.to_string(),
                proposal_result.score.clone(),
                d.grade_name(proposal_result.analysis.median_grade)?
                    .to_string(),
                d.grade_name(proposal_result.analysis.second_median_grade)?
                    .to_string(),
            ]);
        }
        write_csv_records(records)
    }
}
