#![no_main]

use fgen::render::doc::{DocOptions, render_doc};
use fgen_syntax::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(source) = std::str::from_utf8(data) {
        let tokens = lexer::lex(source);
        let parsed = parser::parse(source, &tokens);
        let artifact = render_doc(source, &tokens, &parsed.tree, DocOptions::default());
        // Inserting blocks must never change the original text.
        assert!(artifact.verify(source).is_ok());
    }
});
