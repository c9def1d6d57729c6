use crate::util::format::truncate_comment;
use console::style;
use std::io::BufRead;
use tema_lib::{Config, MatchReason, Result, TopicClassifier};

pub fn handle_classify_command(config: &Config, text: Vec<String>, explain: bool) -> Result<()> {
    let campaign = config.load_campaign()?;
    let classifier = campaign.classifier()?;

    if !text.is_empty() {
        for comment in &text {
            print_result(&classifier, comment, explain);
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut line = Vec::new();
    let mut reader = stdin.lock();
    // Read raw bytes so a bad line is replaced rather than aborting the stream.
    while reader.read_until(b'\n', &mut line)? > 0 {
        let comment = String::from_utf8_lossy(&line);
        let comment = comment.trim_end_matches(['\n', '\r']);
        print_result(&classifier, comment, explain);
        line.clear();
    }

    Ok(())
}

fn print_result(classifier: &TopicClassifier, comment: &str, explain: bool) {
    if !explain {
        println!("{}\t{}", classifier.classify(comment), comment);
        return;
    }

    let result = classifier.classify_detailed(comment);
    let evidence = match (result.reason, result.rule_index, &result.matched) {
        (MatchReason::Keyword, Some(index), Some(matched)) => {
            format!("rule #{} matched '{}'", index + 1, matched)
        }
        (MatchReason::ShortComment, Some(index), _) => format!(
            "rule #{} short comment (< {} words)",
            index + 1,
            classifier.rule_set().short_comment_threshold
        ),
        _ => "no rule matched".to_string(),
    };

    println!(
        "{} {}  {}",
        style(result.label).bold(),
        style(format!("[{}: {}]", result.reason, evidence)).dim(),
        truncate_comment(comment, 60)
    );
}
