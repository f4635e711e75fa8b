use icu_normalizer::DecomposingNormalizerBorrowed;

/// Typographic characters rewritten to what a plain keyboard can type.
/// Applied before decomposition so compatibility forms (fractions, ellipsis)
/// get these spellings rather than NFKD's.
const REPLACEMENTS: &[(char, &str)] = &[
    // quotes and primes
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201a}', "'"),
    ('\u{201b}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{201e}', "\""),
    ('\u{201f}', "\""),
    ('\u{2032}', "'"),
    ('\u{2033}', "\""),
    ('\u{2034}', "'''"),
    ('\u{2035}', "'"),
    ('\u{2036}', "\""),
    ('\u{2037}', "'''"),
    // dashes
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2012}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "--"),
    ('\u{2015}', "--"),
    ('\u{2053}', "~"),
    ('\u{2026}', "..."),
    // spaces
    ('\u{00a0}', " "),
    ('\u{2000}', " "),
    ('\u{2001}', " "),
    ('\u{2002}', " "),
    ('\u{2003}', " "),
    ('\u{2004}', " "),
    ('\u{2005}', " "),
    ('\u{2006}', " "),
    ('\u{2007}', " "),
    ('\u{2008}', " "),
    ('\u{2009}', " "),
    ('\u{200a}', " "),
    ('\u{200b}', ""),
    ('\u{200c}', ""),
    ('\u{200d}', ""),
    ('\u{202f}', " "),
    // math
    ('\u{00d7}', "x"),
    ('\u{00f7}', "/"),
    ('\u{00b1}', "+/-"),
    ('\u{2260}', "!="),
    ('\u{2264}', "<="),
    ('\u{2265}', ">="),
    ('\u{2212}', "-"),
    ('\u{2217}', "*"),
    // currency
    ('\u{00a2}', "cents"),
    ('\u{00a3}', "GBP"),
    ('\u{00a4}', "USD"),
    ('\u{00a5}', "JPY"),
    ('\u{20ac}', "EUR"),
    // marks
    ('\u{00a9}', "(c)"),
    ('\u{00ae}', "(r)"),
    ('\u{2122}', "TM"),
    ('\u{2117}', "(p)"),
    ('\u{2120}', "SM"),
    // fractions
    ('\u{00bc}', "1/4"),
    ('\u{00bd}', "1/2"),
    ('\u{00be}', "3/4"),
    ('\u{2044}', "/"),
    ('\u{00b0}', "deg"),
    ('\u{00b5}', "u"),
    // bullets and rare punctuation
    ('\u{2022}', "*"),
    ('\u{2023}', ">"),
    ('\u{2043}', "-"),
    ('\u{204e}', "*"),
    ('\u{204f}', ";"),
    ('\u{2051}', "**"),
    ('\u{2052}', "%"),
    ('\u{2056}', "..."),
    ('\u{2058}', "...."),
    ('\u{2059}', "....."),
    // arrows
    ('\u{2190}', "<-"),
    ('\u{2191}', "^"),
    ('\u{2192}', "->"),
    ('\u{2193}', "v"),
    ('\u{2194}', "<->"),
    ('\u{2195}', "^v"),
    // misc
    ('\u{00ab}', "<<"),
    ('\u{00bb}', ">>"),
    ('\u{00a1}', "!"),
    ('\u{00bf}', "?"),
    ('\u{00b7}', "*"),
    ('\u{00b6}', "P"),
    ('\u{00a7}', "S"),
    ('\u{2126}', "Ohm"),
    ('\u{212b}', "A"),
];

fn replacement(ch: char) -> Option<&'static str> {
    REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}

fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}'..='\u{036f}'
            | '\u{1ab0}'..='\u{1aff}'
            | '\u{1dc0}'..='\u{1dff}'
            | '\u{20d0}'..='\u{20ff}'
            | '\u{fe20}'..='\u{fe2f}'
    )
}

/// Rewrite text fetched from outside (quotes, files, commands) into
/// characters found on a keyboard: typographic punctuation is replaced,
/// then accents are stripped via NFKD.
pub fn normalize_text(text: &str) -> String {
    let mut replaced = String::with_capacity(text.len());
    for ch in text.chars() {
        match replacement(ch) {
            Some(to) => replaced.push_str(to),
            None => replaced.push(ch),
        }
    }

    let nfkd = DecomposingNormalizerBorrowed::new_nfkd();
    nfkd.normalize(&replaced)
        .chars()
        .filter(|&c| !is_combining_mark(c))
        .collect()
}
