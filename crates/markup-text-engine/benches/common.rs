// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_article(paragraphs: usize) -> String {
    let base = r#"<h2 class="title">Quarterly report</h2><p>Revenue grew <b>12%</b> compared to <a href="https://example.com/q1">last quarter</a>.</p><ul><li>North &amp; South<li>East</ul><img src="chart.png" alt="Chart">"#;
    let mut html = String::new();
    for i in 0..paragraphs {
        html.push_str(base);
        html.push_str(&format!("<p>Paragraph {i} with <i>inline</i> markup.</p>"));
    }
    html
}

#[allow(dead_code)]
pub fn generate_hostile_markup(repeats: usize) -> String {
    let base = r#"<div onclick="x()"><scr<script>ipt>alert(1)</script><a href="java&#x09;script:x">y</a><!-- c --><p>a<p>b</i><style>p{}</style>"#;
    base.repeat(repeats)
}
