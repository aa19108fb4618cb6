use super::{
    ContentRun, Hyperlink, InlineSpan, RawInline, RawRun,
    lexer::{atoms, is_word_char},
};
use crate::error::DocGraphError;

/// Turns a block's raw inline events into styled atoms.
///
/// Each run is split into atoms carrying the run's flags. When a run starts
/// mid-word with the same flags the previous run ended with, the two halves
/// are fused back into one atom. Hyperlinks are assembled the same way on
/// their own runs and then appended whole; nothing is fused across a link
/// boundary.
pub fn assemble(inlines: &[RawInline]) -> Result<Vec<InlineSpan>, DocGraphError> {
    let mut spans: Vec<InlineSpan> = Vec::new();

    for inline in inlines {
        match inline {
            RawInline::Run(run) => {
                let mut new_atoms = tokenize(run);
                if let Some(InlineSpan::Run(last)) = spans.last_mut() {
                    fuse_leading(last, &mut new_atoms);
                }
                spans.extend(new_atoms.into_iter().map(InlineSpan::Run));
            }
            RawInline::Hyperlink(link) => {
                let mut runs: Vec<ContentRun> = Vec::new();
                for run in &link.runs {
                    append_run(&mut runs, run);
                }
                let hyperlink = Hyperlink::new(
                    runs,
                    Some(link.address.as_str()),
                    Some(link.fragment.as_str()),
                )?;
                spans.push(InlineSpan::Link(hyperlink));
            }
        }
    }

    log::trace!("assembled {} inline events into {} spans", inlines.len(), spans.len());
    Ok(spans)
}

/// Appends one run's atoms to a plain run list, fusing across the seam.
pub fn append_run(runs: &mut Vec<ContentRun>, run: &RawRun) {
    let mut new_atoms = tokenize(run);
    if let Some(last) = runs.last_mut() {
        fuse_leading(last, &mut new_atoms);
    }
    runs.extend(new_atoms);
}

fn tokenize(run: &RawRun) -> Vec<ContentRun> {
    atoms(&run.text)
        .into_iter()
        .map(|atom| ContentRun::new(atom.text, run.flags))
        .collect()
}

/// Folds the first new atom into `last` when both sides of the seam are
/// word characters with identical flags.
fn fuse_leading(last: &mut ContentRun, new_atoms: &mut Vec<ContentRun>) {
    let Some(first) = new_atoms.first() else {
        return;
    };

    let ends_in_word = last.text.chars().next_back().is_some_and(is_word_char);
    let starts_with_word = first.text.chars().next().is_some_and(is_word_char);

    if ends_in_word && starts_with_word && last.flags == first.flags {
        let first = new_atoms.remove(0);
        last.text.push_str(&first.text);
    }
}
