//! Okapi BM25 ranking over an in-memory tokenized corpus.
//!
//! Statistics are derived once from the token sequences and never persisted.

use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f32,
    /// Length normalization strength.
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self { Self { k1: 1.5, b: 0.75 } }
}

#[derive(Debug, Clone)]
pub struct Bm25 {
    params: Bm25Params,
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<u32>,
    avgdl: f32,
    idf: HashMap<String, f32>,
}

impl Bm25 {
    pub fn new(docs: &[Vec<String>], params: Bm25Params) -> Self {
        let mut term_freqs = Vec::with_capacity(docs.len());
        let mut doc_lens = Vec::with_capacity(docs.len());
        let mut df: HashMap<String, u32> = HashMap::new();
        let mut total_len = 0u64;

        for tokens in docs {
            let mut tf: HashMap<String, u32> = HashMap::new();
            for t in tokens {
                *tf.entry(t.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            total_len += tokens.len() as u64;
            doc_lens.push(tokens.len() as u32);
            term_freqs.push(tf);
        }

        let n = docs.len() as f32;
        let avgdl = if docs.is_empty() { 0.0 } else { total_len as f32 / n };
        // Non-negative IDF: a matching term never lowers a passage's score.
        let idf = df
            .into_iter()
            .map(|(term, df_t)| {
                let df_t = df_t as f32;
                (term, ((n - df_t + 0.5) / (df_t + 0.5) + 1.0).ln())
            })
            .collect();

        Self { params, term_freqs, doc_lens, avgdl, idf }
    }

    pub fn num_docs(&self) -> usize { self.doc_lens.len() }

    /// Inverse document frequency of a term, 0 when the term is not in the corpus.
    pub fn idf(&self, term: &str) -> f32 { self.idf.get(term).copied().unwrap_or(0.0) }

    /// Score every document against the query tokens. Index `i` is document `i`.
    pub fn scores(&self, query: &[String]) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.num_docs()];
        if self.avgdl == 0.0 {
            return scores;
        }
        let Bm25Params { k1, b } = self.params;
        for term in query {
            let idf = match self.idf.get(term) {
                Some(&w) => w,
                None => continue,
            };
            for (doc, tf_map) in self.term_freqs.iter().enumerate() {
                let tf = match tf_map.get(term) {
                    Some(&tf) => tf as f32,
                    None => continue,
                };
                let dl = self.doc_lens[doc] as f32;
                let tf_norm = (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * dl / self.avgdl));
                scores[doc] += idf * tf_norm;
            }
        }
        scores
    }

    /// Top `n` documents as `(doc, score)`, by descending score with ties in corpus order.
    pub fn top_n(&self, query: &[String], n: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self.scores(query).into_iter().enumerate().collect();
        // sort_by is stable: equal scores stay in corpus order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(n);
        scored
    }
}
