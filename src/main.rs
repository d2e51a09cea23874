//! Demonstrates custom document-boost scoring over an in-memory index.
//!
//! Two documents are indexed: "a" matches the query term three times with a
//! stored boost of 1.0, "b" matches once with a stored boost of 2.0. The
//! baseline term search ranks "a" first; the same query wrapped in a score
//! decorator multiplies each score by the stored boost and ranks "b" first.

use anyhow::{Context, Result};
use clap::Parser;
use tantivy::schema::{Schema, STORED, STRING, TEXT};
use tantivy::{Index, IndexWriter, TantivyDocument};

use rescore::{
    boost_transform, encode_boost, DocumentMatchIterator, EngineQuery, ScoreDecoratorQuery,
    SearchReader, TopNRequest, BOOST_FIELD,
};

#[derive(Parser)]
#[command(name = "rescore", version, about = "Custom document-boost scoring demo")]
struct Cli {
    /// Explain document match scores
    #[arg(long)]
    explain: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rescore=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut schema_builder = Schema::builder();
    let id = schema_builder.add_text_field("id", STRING | STORED);
    let desc = schema_builder.add_text_field("desc", TEXT);
    let boost = schema_builder.add_bytes_field(BOOST_FIELD, STORED);
    let schema = schema_builder.build();

    let index = Index::create_in_ram(schema);
    let mut writer: IndexWriter = index.writer(15_000_000).context("opening index writer")?;

    // The boost lives in a stored-only field; its format only needs to be
    // known by us when we decode it for custom scoring at search time.

    // document 'a' has term 'cat' in field 'desc' with freq 3 and a boost of 1.0
    let mut doc_a = TantivyDocument::new();
    doc_a.add_text(id, "a");
    doc_a.add_text(desc, "cat cat cat");
    doc_a.add_bytes(boost, encode_boost(1.0).to_vec());
    writer.add_document(doc_a).context("indexing document 'a'")?;

    // document 'b' has term 'cat' in field 'desc' with freq 1 and a boost of 2.0
    let mut doc_b = TantivyDocument::new();
    doc_b.add_text(id, "b");
    doc_b.add_text(desc, "cat");
    doc_b.add_bytes(boost, encode_boost(2.0).to_vec());
    writer.add_document(doc_b).context("indexing document 'b'")?;

    writer.commit().context("committing documents")?;

    let reader = SearchReader::open(&index).context("opening reader")?;

    // search for cat
    let query = EngineQuery::term(desc, "cat");
    let request = TopNRequest::new(10, &query).explain_scores(cli.explain);
    let matches = reader.search(&request).context("searching")?;
    println!("natural term score:");
    print_results(&reader, matches)?;

    // The decorated query finds the same matches, but multiplies every score
    // by the boost loaded from the matched document's stored fields. The
    // transformation captures a clone of the reader; clones share the same
    // isolated snapshot, so reading stored fields mid-search is safe.
    let decorated = ScoreDecoratorQuery::new(query.clone(), boost_transform(reader.clone()));
    let request = TopNRequest::new(10, &decorated).explain_scores(cli.explain);
    let matches = reader
        .search(&request)
        .context("searching with custom scores")?;
    println!("custom score with document boost:");
    print_results(&reader, matches)?;

    Ok(())
}

fn print_results(reader: &SearchReader, matches: DocumentMatchIterator) -> Result<()> {
    for matched in matches {
        let mut id = String::new();
        reader
            .visit_stored_fields(matched.ordinal, |field, value| {
                if field == "id" {
                    id = String::from_utf8_lossy(value).into_owned();
                }
                true
            })
            .context("loading stored fields")?;
        match &matched.explanation {
            Some(explanation) => {
                println!("id: {} score: {:.6} expl: {}", id, matched.score, explanation)
            }
            None => println!("id: {} score: {:.6} expl: none", id, matched.score),
        }
    }
    Ok(())
}
