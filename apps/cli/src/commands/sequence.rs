use dart_core::operations;
use dart_core::sequence::sanitize;
use dart_formats::buffer;

pub fn transcript(seq: &str, reverse: bool) {
    let seq = sanitize(seq);
    if reverse {
        println!("{}", operations::template_for_transcript(&seq));
    } else {
        println!("{}", operations::rna_transcript(&seq));
    }
}

pub fn salt(text: &str) {
    match buffer::highest_salt(text) {
        Some(found) => println!("{}\t{}", found.salt, found.millimolar),
        None => println!("none"),
    }
}
