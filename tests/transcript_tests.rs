// Unit tests for transcript accumulation
//
// These tests verify the interim/final accumulation algebra: committed text
// grows only on final windows, live text always reflects the full
// transcript-so-far, and the final form is the trimmed committed text.

use speech_session::{RecognizedSegment, ResultEvent, Transcript};

fn interim(text: &str) -> ResultEvent {
    ResultEvent {
        segments: vec![RecognizedSegment {
            text: text.to_string(),
            is_final: false,
        }],
    }
}

fn final_window(text: &str) -> ResultEvent {
    ResultEvent {
        segments: vec![RecognizedSegment {
            text: text.to_string(),
            is_final: true,
        }],
    }
}

#[test]
fn test_new_transcript_is_empty() {
    let transcript = Transcript::new();

    assert_eq!(transcript.committed(), "");
    assert_eq!(transcript.live(), "");
    assert_eq!(transcript.final_text(), "");
    assert!(transcript.segments().is_empty());
}

#[test]
fn test_interim_updates_live_only() {
    let mut transcript = Transcript::new();

    let (live, is_final) = transcript.apply(&interim("hello"));

    assert_eq!(live, "hello");
    assert!(!is_final);
    assert_eq!(transcript.committed(), "", "interim must not commit");
    assert_eq!(transcript.live(), "hello");
}

#[test]
fn test_final_commits_with_trailing_space() {
    let mut transcript = Transcript::new();

    let (live, is_final) = transcript.apply(&final_window("hello"));

    assert_eq!(live, "hello ");
    assert!(is_final);
    assert_eq!(transcript.committed(), "hello ");
    assert_eq!(transcript.live(), "hello ");
}

#[test]
fn test_final_revises_interim() {
    // The engine may revise an utterance up until finalization
    let mut transcript = Transcript::new();

    transcript.apply(&interim("こんにち"));
    assert_eq!(transcript.live(), "こんにち");

    transcript.apply(&final_window("こんにちは"));
    assert_eq!(transcript.committed(), "こんにちは ");
    assert_eq!(transcript.live(), "こんにちは ");
    assert_eq!(transcript.final_text(), "こんにちは");
}

#[test]
fn test_utterances_accumulate_in_order() {
    let mut transcript = Transcript::new();

    transcript.apply(&final_window("first"));
    transcript.apply(&final_window("second"));
    transcript.apply(&final_window("third"));

    assert_eq!(transcript.committed(), "first second third ");
    assert_eq!(transcript.final_text(), "first second third");
}

#[test]
fn test_interim_tail_follows_committed_text() {
    let mut transcript = Transcript::new();

    transcript.apply(&final_window("hello"));
    let (live, _) = transcript.apply(&interim("wor"));

    assert_eq!(live, "hello wor");
    assert_eq!(transcript.committed(), "hello ", "tail must not commit");
}

#[test]
fn test_final_text_excludes_interim_tail() {
    let mut transcript = Transcript::new();

    transcript.apply(&final_window("hello"));
    transcript.apply(&interim("wor"));

    assert_eq!(transcript.final_text(), "hello");
}

#[test]
fn test_multi_segment_window_is_concatenated() {
    let mut transcript = Transcript::new();

    let window = ResultEvent {
        segments: vec![
            RecognizedSegment {
                text: "good ".to_string(),
                is_final: true,
            },
            RecognizedSegment {
                text: "morning".to_string(),
                is_final: true,
            },
        ],
    };

    let (live, is_final) = transcript.apply(&window);

    assert!(is_final);
    assert_eq!(live, "good morning ");
}

#[test]
fn test_last_segment_decides_finality() {
    let mut transcript = Transcript::new();

    // A window whose last segment is still interim stays interim as a whole
    let window = ResultEvent {
        segments: vec![
            RecognizedSegment {
                text: "good ".to_string(),
                is_final: true,
            },
            RecognizedSegment {
                text: "mor".to_string(),
                is_final: false,
            },
        ],
    };

    let (live, is_final) = transcript.apply(&window);

    assert!(!is_final);
    assert_eq!(live, "good mor");
    assert_eq!(transcript.committed(), "");
}

#[test]
fn test_empty_window_keeps_live_at_committed() {
    let mut transcript = Transcript::new();

    transcript.apply(&final_window("hello"));
    let (live, is_final) = transcript.apply(&ResultEvent { segments: vec![] });

    assert!(!is_final);
    assert_eq!(live, "hello ");
}

#[test]
fn test_reset_discards_everything() {
    let mut transcript = Transcript::new();

    transcript.apply(&final_window("hello"));
    transcript.apply(&interim("wor"));
    assert!(!transcript.segments().is_empty());

    transcript.reset();

    assert_eq!(transcript.committed(), "");
    assert_eq!(transcript.live(), "");
    assert!(transcript.segments().is_empty());
}

#[test]
fn test_segment_history_records_every_window() {
    let mut transcript = Transcript::new();

    transcript.apply(&interim("he"));
    transcript.apply(&interim("hel"));
    transcript.apply(&final_window("hello"));

    let segments = transcript.segments();
    assert_eq!(segments.len(), 3);
    assert!(!segments[0].is_final);
    assert!(!segments[1].is_final);
    assert!(segments[2].is_final);
    assert_eq!(segments[2].text, "hello");
}
