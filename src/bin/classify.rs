use anyhow::{Result, bail};
use reviewscope::sentiment::SentimentClassifier;
use serde_json::json;

fn main() -> Result<()> {
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        bail!("usage: classify <text>");
    }

    let classifier = SentimentClassifier::shared();
    let labels = classifier.classify(&text);

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "text": text,
            "lexicon": labels.lexicon,
            "lexicon_score": classifier.lexicon_score(&text),
            "valence": labels.valence,
            "valence_score": classifier.valence_score(&text),
        }))?
    );
    Ok(())
}
