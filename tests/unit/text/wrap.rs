use super::*;

/// Every char advances a fixed number of pixels.
struct FixedAdvance(f32);

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.0
    }
}

fn words_of(layout: &LineLayout) -> Vec<String> {
    layout
        .lines()
        .iter()
        .flat_map(|l| l.split(' ').map(str::to_owned))
        .collect()
}

#[test]
fn empty_and_blank_text_yield_no_lines() {
    let mut m = FixedAdvance(10.0);
    assert!(wrap("", 100.0, &mut m).is_empty());
    assert!(wrap("  \t\n ", 100.0, &mut m).is_empty());
}

#[test]
fn packs_greedily_within_width() {
    let mut m = FixedAdvance(10.0);
    // "A B" = 30px, "A B C" = 50px.
    let layout = wrap("A B C D E", 40.0, &mut m);
    assert_eq!(layout.lines(), ["A B", "C D", "E"]);
}

#[test]
fn exact_fit_is_accepted() {
    let mut m = FixedAdvance(10.0);
    let layout = wrap("ab cd", 50.0, &mut m);
    assert_eq!(layout.lines(), ["ab cd"]);
}

#[test]
fn long_word_stands_alone_without_blank_line() {
    let mut m = FixedAdvance(10.0);
    let layout = wrap("supercalifragilistic a bb", 40.0, &mut m);
    assert_eq!(layout.lines(), ["supercalifragilistic", "a bb"]);

    let layout = wrap("a supercalifragilistic b", 40.0, &mut m);
    assert_eq!(layout.lines(), ["a", "supercalifragilistic", "b"]);
}

#[test]
fn lines_fit_unless_single_overlong_word() {
    let text = "the quick brown fox jumps over an extraordinarily lazy dog";
    for w in [5.0f32, 30.0, 55.0, 80.0, 200.0] {
        let mut m = FixedAdvance(6.0);
        let layout = wrap(text, w, &mut m);
        for line in layout.lines() {
            let width = m.measure(line);
            assert!(
                width <= w || !line.contains(' '),
                "line {line:?} measures {width} > {w}"
            );
        }
    }
}

#[test]
fn word_order_is_preserved_and_whitespace_collapsed() {
    let text = "  Братья!   ГОЙДА\tнавсегда \n вперёд ";
    let mut m = FixedAdvance(8.0);
    let layout = wrap(text, 60.0, &mut m);
    let expected: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
    assert_eq!(words_of(&layout), expected);
    assert!(layout.lines().iter().all(|l| !l.is_empty()));
}

#[test]
fn multibyte_words_are_measured_by_chars() {
    let mut m = FixedAdvance(10.0);
    // 5 chars each, 11 chars joined.
    let layout = wrap("слоны медве", 110.0, &mut m);
    assert_eq!(layout.lines(), ["слоны медве"]);
    let layout = wrap("слоны медве", 109.0, &mut m);
    assert_eq!(layout.lines(), ["слоны", "медве"]);
}
