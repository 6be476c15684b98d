//! End-to-end parsing tests over HTML input.
//!
//! The fixture lives with the integration tests in `tests/fixtures/`.

use crate::markup::html;
use crate::models::{ContentBlock, Line, Play};
use crate::parsing::{
    ElementClassifier, ParseError, ParseOptions, Role, StructureErrorKind, parse_html,
};

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.html", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(path).unwrap()
}

fn parse(html: &str) -> Result<Play, ParseError> {
    parse_html(html, &ParseOptions::default())
}

fn boundary_count(html: &str) -> usize {
    let classifier = ElementClassifier::new(&ParseOptions::default()).unwrap();
    let boundaries: Vec<_> = html::body_elements(html)
        .into_iter()
        .filter(|e| classifier.classify(e) == Role::ActOrSceneBoundary)
        .collect();
    // An act marker consumes the scene label after it.
    let acts = boundaries
        .iter()
        .filter(|e| classifier.is_act_marker(e))
        .count();
    boundaries.len() - acts
}

#[test]
fn fixture_scene_count_matches_boundaries() {
    let html = fixture("lear_excerpt");
    let play = parse(&html).unwrap();

    assert_eq!(play.len(), boundary_count(&html) + 1);
    assert!(play.scenes()[0].is_empty());
}

#[test]
fn headings_with_attributes_still_count_as_boundaries() {
    let html = r#"<body>
<h3 class="act">ACT I</h3>
<h3 class="scene">SCENE I. Castle.</h3>
<p>Enter Lear</p>
<a>LEAR</a><blockquote><a name="1.1.1">Attend.</a></blockquote>
<h3 id="s2">SCENE II. Heath.</h3>
<p>Storm</p>
</body>"#;

    let play = parse(html).unwrap();

    assert_eq!(boundary_count(html), 2);
    assert_eq!(play.len(), boundary_count(html) + 1);
}

#[test]
fn fixture_citations_never_go_backwards_within_a_scene() {
    let play = parse(&fixture("lear_excerpt")).unwrap();

    for scene in play.scenes() {
        let dialogues: Vec<_> = scene.dialogues().collect();
        for pair in dialogues.windows(2) {
            assert!(pair[1].start >= pair[0].end, "{pair:?}");
        }
    }
}

#[test]
fn fixture_citations_agree_with_headings() {
    let play = parse(&fixture("lear_excerpt")).unwrap();

    for scene in play.scenes().iter().skip(1) {
        let heading = scene.heading().unwrap();
        for dialogue in scene.dialogues() {
            assert_eq!((dialogue.act, dialogue.scene), (heading.act, heading.scene));
        }
    }
}

#[test]
fn embedded_direction_stays_in_place() {
    let play = parse(&fixture("lear_excerpt")).unwrap();

    let gloucester = play
        .dialogues()
        .find(|d| d.character == "GLOUCESTER")
        .unwrap();
    assert!(matches!(gloucester.lines[2], Line::StageDirection(_)));
    assert_eq!(gloucester.spoken_lines().count(), 3);
}

#[test]
fn act_and_scene_headings_open_one_scene() {
    let html = r#"<body>
<h3>ACT I</h3>
<h3>SCENE I. Castle.</h3>
<p>Enter Lear...</p>
<a>Lear</a>
<blockquote>
<a name="1.1.1">Attend...</a>
<a name="1.1.5">Give me the map.</a>
</blockquote>
</body>"#;

    let play = parse(html).unwrap();

    assert_eq!(play.len(), 2);
    let scene = &play.scenes()[1];
    let heading = scene.heading().unwrap();
    assert_eq!(heading.setting, "SCENE I. Castle.");
    assert_eq!(heading.staging, Line::StageDirection("Enter Lear...".into()));
    let ContentBlock::Dialogue(dialogue) = &scene.blocks()[1] else {
        panic!("expected dialogue");
    };
    assert_eq!(
        (dialogue.character.as_str(), dialogue.start, dialogue.end),
        ("Lear", 1, 5)
    );
    assert_eq!(dialogue.lines.len(), 2);
}

#[test]
fn empty_dialogue_is_fatal() {
    let html = r#"<body><h3>SCENE I. Heath.</h3><p>Storm</p>
<a>FOOL</a><blockquote><p>Sings</p></blockquote></body>"#;

    assert!(matches!(
        parse(html),
        Err(ParseError::EmptyDialogue { .. })
    ));
}

#[test]
fn malformed_citation_is_fatal() {
    let html = r#"<body><h3>SCENE I. Heath.</h3><p>Storm</p>
<a>FOOL</a><blockquote><a name="1.1.abc">Nuncle</a></blockquote></body>"#;

    let err = parse(html).unwrap_err();
    assert!(matches!(err, ParseError::CitationFormat { .. }));
    assert!(err.to_string().contains("abc"));
    // h3, p, a, then the blockquote holding the bad citation
    assert_eq!(err.position(), Some(3));
}

#[test]
fn boundary_without_staging_is_fatal() {
    let html = r#"<body><h3>SCENE I. Heath.</h3><h3>SCENE II. Hovel.</h3><p>Enter</p></body>"#;

    assert!(matches!(
        parse(html),
        Err(ParseError::Structure {
            kind: StructureErrorKind::MissingStaging,
            ..
        })
    ));
}

#[test]
fn custom_markup_conventions() {
    let html = r#"<body>
<h2>Act One</h2>
<h2>Scene 1. A street.</h2>
<div>Enter ROMEO</div>
<span>ROMEO</span>
<section><em data-cite="1.1.1">Is the day so young?</em><aside>Sighs</aside></section>
</body>"#;
    let options = ParseOptions {
        boundary_tag: "h2".into(),
        anchor_tag: "span".into(),
        container_tag: "section".into(),
        direction_tag: "aside".into(),
        citation_attribute: "data-cite".into(),
        ..ParseOptions::default()
    };

    // Spoken lines inside the container use the anchor tag, so <em> is ignored.
    let err = parse_html(html, &options).unwrap_err();
    assert!(matches!(err, ParseError::EmptyDialogue { .. }));

    let html = html.replace("<em ", "<span ").replace("</em>", "</span>");
    let play = parse_html(&html, &options).unwrap();
    let dialogue = play.dialogues().next().unwrap();
    assert_eq!(dialogue.character, "ROMEO");
    assert_eq!(
        dialogue.lines,
        vec![
            Line::SpokenText("Is the day so young?".into()),
            Line::StageDirection("Sighs".into()),
        ]
    );
}
