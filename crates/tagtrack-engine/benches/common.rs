// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_tei_content(paragraphs: usize) -> String {
    let mut content = String::from("<TEI>\n  <text>\n    <body>\n");
    for i in 0..paragraphs {
        content.push_str(&format!(
            "      <p n=\"{i}\">Text with <note n=\"{i}a\">a note</note> and\n        <note\n          type=\"wrapped\">another</note> then <pb n=\"{i}\"/></p>\n"
        ));
    }
    content.push_str("    </body>\n  </text>\n</TEI>\n");
    content
}
