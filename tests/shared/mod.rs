/// `(spelling, pos, lemmas)` triples the embedded tables resolve.
pub(crate) fn get_test_corpus() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("catalyses", "NNS", "catalyse"),
        ("radiolabeled", "VBZ", "radiolabel"),
        ("was", "VBZ", "be"),
        ("found", "VBZ", "find"),
        (".", ".", "."),
        ("Mitochondria", "NN", "mitochondrion"),
        ("isotope", "NN", "isotope"),
        ("don't", "vdb|xx", "do||not"),
        ("cannot", "MD|RB", "can||not"),
    ]
}

pub(crate) fn write_input(corpus: &[(&str, &str, &str)]) -> String {
    corpus
        .iter()
        .map(|(spelling, pos, _)| format!("{spelling}\t{pos}\n"))
        .collect()
}
