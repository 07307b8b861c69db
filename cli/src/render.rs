use konjug::{Conjugation, Conjugator};
use std::io::{self, Write};

pub(crate) fn declarations(out: &mut impl Write, conjugator: &Conjugator) -> io::Result<()> {
    writeln!(out, "forms: {}", conjugator.forms().join(" "))?;
    let paradigms = conjugator
        .paradigms()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>();
    writeln!(out, "paradigms: {}", paradigms.join(" "))
}

pub(crate) fn conjugation(
    out: &mut impl Write,
    verb: &str,
    conjugation: &Conjugation,
) -> io::Result<()> {
    writeln!(out, "{}", verb)?;
    let width = conjugation
        .iter()
        .flat_map(|f| f.iter().map(|(k, _)| k.chars().count()))
        .max()
        .unwrap_or(0);
    for form in conjugation.iter() {
        writeln!(out, "  {}", form.form())?;
        for (key, value) in form.iter() {
            writeln!(out, "    {:width$}  {}", key, value, width = width)?;
        }
    }
    Ok(())
}

pub(crate) fn not_found(out: &mut impl Write, verb: &str) -> io::Result<()> {
    writeln!(out, "{}: no rule matches", verb)
}
