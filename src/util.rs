/// Format a number of seconds as `MM:SS`, or `H:MM:SS` once it reaches an hour.
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    match hours {
        0 => format!("{:02}:{:02}", minutes, seconds),
        h => format!("{}:{:02}:{:02}", h, minutes, seconds),
    }
}
