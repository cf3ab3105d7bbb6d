use deck_core::marp::{self, MarpFormatter};
use deck_core::{segment, ContentLine, LineKind, Segmenter, SegmenterConfig, SlideRecord};

#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        (self.next_u64() >> 33) % bound
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.next_below(items.len() as u64) as usize]
    }
}

const WORDS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "Überblick", "café", "数据", "Q&A", "<tag>", "3.5%",
];

/// Body lines Markdown would otherwise read as rules or underlines.
const RULE_LIKE: &[&str] = &["---", "***", "___", "-----", "=="];

/// One generated slide: its title and the non-blank body lines as written.
struct GeneratedSlide {
    title: String,
    lines: Vec<String>,
}

fn phrase(rng: &mut Lcg) -> String {
    let count = 1 + rng.next_below(4) as usize;
    (0..count)
        .map(|_| rng.pick(WORDS))
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_slide(rng: &mut Lcg) -> GeneratedSlide {
    let title = phrase(rng);
    let lines = (0..rng.next_below(5))
        .map(|i| match rng.next_below(5) {
            0 => format!("{}. {}", i + 1, phrase(rng)),
            1 => format!("- {}", phrase(rng)),
            2 => format!("* {}", phrase(rng)),
            3 if rng.next_below(2) == 0 => rng.pick(RULE_LIKE).to_string(),
            _ => phrase(rng),
        })
        .collect();
    GeneratedSlide { title, lines }
}

/// Render generated slides as an outline. Slides are separated by at least
/// `threshold` blank lines; inside a slide, blank runs stay below it.
fn render_outline(rng: &mut Lcg, slides: &[GeneratedSlide], threshold: usize) -> String {
    let mut out = String::new();
    for (i, slide) in slides.iter().enumerate() {
        if i > 0 {
            let extra = rng.next_below(3) as usize;
            out.push_str(&"\n".repeat(threshold + extra));
        }
        if rng.next_below(3) == 0 {
            out.push_str("# ");
        }
        out.push_str(&slide.title);
        out.push('\n');
        for line in &slide.lines {
            if threshold > 1 && rng.next_below(4) == 0 {
                out.push_str(&"\n".repeat(threshold - 1));
            }
            out.push_str(&"  ".repeat(rng.next_below(2) as usize));
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn titles(slides: &[SlideRecord]) -> Vec<&str> {
    slides.iter().map(|slide| slide.title.as_str()).collect()
}

#[test]
fn test_randomized_slide_count_and_titles() {
    for threshold in [1, 2, 3] {
        let config = SegmenterConfig::new().with_blank_line_threshold(threshold);
        let segmenter = Segmenter::new(config);

        for seed in 0..200u64 {
            let mut rng = Lcg::new(seed * 31 + threshold as u64);
            let count = 1 + rng.next_below(6) as usize;
            let generated: Vec<GeneratedSlide> =
                (0..count).map(|_| generate_slide(&mut rng)).collect();

            let outline = render_outline(&mut rng, &generated, threshold);
            let slides = segmenter.segment(&outline);

            assert_eq!(slides.len(), count, "seed {} threshold {}", seed, threshold);
            for (slide, expected) in slides.iter().zip(&generated) {
                assert_eq!(slide.title, expected.title, "seed {}", seed);
                assert_eq!(slide.body.len(), expected.lines.len(), "seed {}", seed);
            }
        }
    }
}

#[test]
fn test_randomized_classification_matches_prefix() {
    let segmenter = Segmenter::default();

    for seed in 0..200u64 {
        let mut rng = Lcg::new(seed);
        let generated = generate_slide(&mut rng);
        let outline = render_outline(&mut rng, std::slice::from_ref(&generated), 2);
        let slides = segmenter.segment(&outline);

        for (line, source) in slides[0].body.iter().zip(&generated.lines) {
            let expected_kind = if source.starts_with("- ") || source.starts_with("* ") {
                LineKind::Unordered
            } else if source.split_once(". ").map_or(false, |(digits, _)| {
                !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
            }) {
                LineKind::Ordered {
                    marker: format!("{}.", source.split_once(". ").map(|(d, _)| d).unwrap_or("")),
                }
            } else {
                LineKind::Paragraph
            };
            assert_eq!(line.kind, expected_kind, "seed {} line {:?}", seed, source);
            assert!(source.ends_with(line.text()), "seed {}", seed);
        }
    }
}

#[test]
fn test_randomized_marp_round_trip() {
    let config = SegmenterConfig::default();
    let formatter = MarpFormatter::new();

    for seed in 0..200u64 {
        let mut rng = Lcg::new(seed ^ 0x5eed);
        let count = 1 + rng.next_below(5) as usize;
        let generated: Vec<GeneratedSlide> = (0..count).map(|_| generate_slide(&mut rng)).collect();
        let slides = segment(&render_outline(&mut rng, &generated, 2));

        let markdown = formatter.format(&slides, &config);
        let reparsed = marp::parse(&markdown, &config);

        assert_eq!(reparsed.len(), slides.len(), "seed {}", seed);
        assert_eq!(titles(&reparsed), titles(&slides), "seed {}", seed);
        assert_eq!(reparsed, slides, "seed {}", seed);
    }
}

#[test]
fn test_single_line_outline_is_one_title_only_slide() {
    for text in ["Hello", "  # Hello  ", "Hello\n", "\n\nHello\n\n\n"] {
        assert_eq!(segment(text), vec![SlideRecord::new("Hello")], "{:?}", text);
    }
}

#[test]
fn test_two_blank_lines_give_two_slides() {
    let slides = segment("First\nalpha\n\n\nSecond\nbeta");

    assert_eq!(
        slides,
        vec![
            SlideRecord::new("First").with_line(ContentLine::paragraph("alpha")),
            SlideRecord::new("Second").with_line(ContentLine::paragraph("beta")),
        ]
    );
}

#[test]
fn test_heading_marker_never_doubled() {
    let config = SegmenterConfig::default();
    for title in ["Intro", "# Intro", "### Intro"] {
        let markdown = MarpFormatter::new()
            .with_style(None)
            .format(&segment(title), &config);
        assert!(markdown.ends_with("\n# Intro\n"), "{:?}", markdown);
        assert!(!markdown.contains("# #"));
    }
}
