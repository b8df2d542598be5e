//! Terminal summary of a batch

use colored::*;

use crate::service::DownloadResult;

/// Print which log files were retrieved and how many were not
pub fn print_summary(results: &[DownloadResult]) {
    if results.is_empty() {
        println!("{}", "No log files available.".yellow());
        return;
    }

    println!("{}", summary_line(results).bold());
    for result in results {
        match result.path() {
            Some(path) => println!("  {} {}", "▸".cyan(), path.display()),
            None => println!("  {} {}", "✗".red(), result.log_file.dimmed()),
        }
    }
}

fn summary_line(results: &[DownloadResult]) -> String {
    let retrieved = results.iter().filter(|r| r.path().is_some()).count();
    let failed = results.len() - retrieved;
    if failed == 0 {
        format!("Retrieved {} log file(s)", retrieved)
    } else {
        format!(
            "Retrieved {} of {} log file(s), {} could not be retrieved",
            retrieved,
            results.len(),
            failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::error::FetchError;
    use std::path::PathBuf;

    fn retrieved(name: &str) -> DownloadResult {
        DownloadResult {
            log_file: name.to_string(),
            outcome: Ok(PathBuf::from(format!("/logs/{name}.log"))),
        }
    }

    fn failed(name: &str) -> DownloadResult {
        DownloadResult {
            log_file: name.to_string(),
            outcome: Err(FetchError::Remote {
                status: 500,
                body: "boom".to_string(),
            }),
        }
    }

    #[test]
    fn test_summary_all_retrieved() {
        let results = [retrieved("error/a"), retrieved("error/b")];
        assert_eq!(summary_line(&results), "Retrieved 2 log file(s)");
    }

    #[test]
    fn test_summary_counts_failures() {
        let results = [retrieved("error/a"), failed("error/b"), failed("error/c")];
        assert_eq!(
            summary_line(&results),
            "Retrieved 1 of 3 log file(s), 2 could not be retrieved"
        );
    }
}
