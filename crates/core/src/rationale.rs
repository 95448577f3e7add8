/// Human-readable pass/fail explanation for one compared field.
pub fn build_rationale(field_path: &str, all_passed: bool, total: usize, passed_count: usize) -> String {
    if all_passed {
        format!("All {total} instance(s) of '{field_path}' matched")
    } else {
        let failed = total.saturating_sub(passed_count);
        format!("{failed}/{total} instance(s) of '{field_path}' failed")
    }
}
