use rust_prepease::errors::PrepEaseError;
use rust_prepease::utils::chunker::{ChunkerConfig, chunk, normalize};

fn lecture_notes(words: usize) -> String {
    // 模拟抽取出的讲义文本：段落之间有空行和缩进
    (0..words)
        .map(|i| {
            if i % 40 == 39 {
                format!("term{i}.\n\n    ")
            } else {
                format!("term{i}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn default_window_over_long_document() {
    let text = lecture_notes(1500);
    let chunks = ChunkerConfig::default().split(&text).unwrap();

    // 步长 500：[0,600) [500,1100) [1000,1500)
    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].starts_with("term0 "));
    assert!(chunks[1].starts_with("term500 "));
    assert!(chunks[2].ends_with("term1499"));
    assert_eq!(chunks[2].split(' ').count(), 500);

    for window in chunks.windows(2) {
        let prev: Vec<&str> = window[0].split(' ').collect();
        let next: Vec<&str> = window[1].split(' ').collect();
        assert_eq!(&prev[prev.len() - 100..], &next[..100]);
    }
}

#[test]
fn overlaps_removed_rebuild_normalized_text() {
    let text = lecture_notes(237);
    let (size, overlap) = (50, 15);
    let chunks = chunk(&text, size, overlap).unwrap();

    let mut rebuilt: Vec<String> = Vec::new();
    for (i, c) in chunks.iter().enumerate() {
        let skip = if i == 0 { 0 } else { overlap };
        rebuilt.extend(c.split(' ').skip(skip).map(str::to_string));
    }
    assert_eq!(rebuilt.join(" "), normalize(&text));
}

#[test]
fn short_document_is_one_normalized_chunk() {
    let chunks = chunk("  Binary   search\n\n runs in\tO(log n)  ", 600, 100).unwrap();
    assert_eq!(chunks, vec!["Binary search runs in O(log n)".to_string()]);
}

#[test]
fn blank_documents_produce_nothing() {
    assert!(chunk("", 600, 100).unwrap().is_empty());
    assert!(chunk("   \n\n  ", 600, 100).unwrap().is_empty());
}

#[test]
fn non_advancing_window_is_rejected() {
    assert!(matches!(
        chunk("some text", 10, 10),
        Err(PrepEaseError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ChunkerConfig::new(0, 0),
        Err(PrepEaseError::InvalidConfiguration(_))
    ));
}
