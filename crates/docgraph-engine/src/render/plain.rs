use crate::richtext::{InlineSpan, LinkKind};

/// Raw atom text. External links get their address appended in parentheses.
pub fn render(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            InlineSpan::Run(run) => out.push_str(&run.text),
            InlineSpan::Link(link) => {
                for run in link.runs() {
                    out.push_str(&run.text);
                }
                if link.kind() == LinkKind::External {
                    out.push_str(" (");
                    out.push_str(link.target());
                    out.push(')');
                }
            }
        }
    }
    out
}
