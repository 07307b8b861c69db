//! The [Conjugator], which conjugates verbs for one language.
//!
//! # Examples
//!
//! ```
//! use konjug::{Conjugator, Options};
//!
//! let conjugator = Conjugator::load("fr", Options::new().forms("prs")).unwrap();
//! let conjugation = conjugator.conjugate("être").unwrap().unwrap();
//! let present = conjugation.get("prs").unwrap();
//! assert_eq!(present.get("1sg"), Some("suis"));
//! assert_eq!(present.get("2pl"), Some("êtes"));
//!
//! // Regular verbs are conjugated by their fallback rules.
//! let conjugation = conjugator.conjugate("chanter").unwrap().unwrap();
//! assert_eq!(conjugation.get("prs").unwrap().get("1pl"), Some("chantons"));
//!
//! // A verb that no rule matches is not an error.
//! assert!(conjugator.conjugate("xyz").unwrap().is_none());
//! ```
use crate::{
    cascade::{Lineage, Resolved},
    error::{ConfigError, Error, LoadError, LookupError},
    fallback,
    options::{Options, Selected},
    transform,
    tree::{ParadigmKey, RuleTree},
};
use once_cell::sync::Lazy;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// The environment variable that overrides the directory rule files are
/// loaded from.
pub const DATA_DIR_ENV: &str = "KONJUG_DATA_DIR";

static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| match env::var_os(DATA_DIR_ENV) {
    Some(dir) => PathBuf::from(dir),
    None => Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
});

/// The directory [Conjugator::load] reads rule files from. This is
/// `$KONJUG_DATA_DIR` if it was set when first needed, otherwise the `data`
/// directory shipped with this crate.
pub fn data_dir() -> &'static Path {
    &DATA_DIR
}

/// Conjugates verbs using the rule data for one language.
///
/// A `Conjugator` is never modified by conjugating a verb, so one instance
/// can be shared between threads.
#[derive(Debug)]
pub struct Conjugator {
    lang: String,
    tree: RuleTree,
    options: Options,
    selected: Selected,
}

impl Conjugator {
    /// Loads the rule file for `lang` (for example `fr`) from [data_dir].
    pub fn load(lang: &str, options: Options) -> Result<Self, Error> {
        Self::load_from(data_dir(), lang, options)
    }

    /// Loads the rule file `<dir>/<lang>.xml`.
    pub fn load_from(dir: impl AsRef<Path>, lang: &str, options: Options) -> Result<Self, Error> {
        let path = dir.as_ref().join(format!("{}.xml", lang));
        debug!(lang, path = %path.display(), "loading rule file");
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let tree = RuleTree::from_xml(&text)?;
        Self::from_tree(lang, tree, options)
    }

    pub fn from_tree(lang: &str, tree: RuleTree, options: Options) -> Result<Self, Error> {
        let selected = options.resolve(&tree)?;
        Ok(Self {
            lang: lang.to_string(),
            tree,
            options,
            selected,
        })
    }

    /// The language code this conjugator was created for.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Every form the language declares, in order, regardless of the
    /// options.
    pub fn forms(&self) -> &[String] {
        self.tree.forms()
    }

    /// Every paradigm the language declares, in order, regardless of the
    /// options.
    pub fn paradigms(&self) -> &[ParadigmKey] {
        self.tree.paradigms()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn tree(&self) -> &RuleTree {
        &self.tree
    }

    /// Replaces the options. If the new options name a form or paradigm the
    /// language does not declare, this returns an error and the old options
    /// stay in effect.
    pub fn set_options(&mut self, options: Options) -> Result<(), ConfigError> {
        self.selected = options.resolve(&self.tree)?;
        self.options = options;
        Ok(())
    }

    /// Conjugates `verb` for every selected form and paradigm.
    ///
    /// The rules come from the verb's own entry if it has one, otherwise from
    /// the first fallback rule whose pattern matches it. If neither exists,
    /// this returns `Ok(None)`.
    ///
    /// An error means the rule data itself is broken: an `inherit` or
    /// fallback reference names a verb-set that does not exist, or a chain
    /// of `inherit` references loops.
    pub fn conjugate(&self, verb: &str) -> Result<Option<Conjugation>, LookupError> {
        let root = match self.tree.find_verb(verb) {
            Some(node) => node,
            None => match fallback::match_fallback(&self.tree, verb)? {
                Some(node) => node,
                None => {
                    debug!(verb, "no rule matches");
                    return Ok(None);
                }
            },
        };

        let lineage = Lineage::new(&self.tree, root)?;
        debug!(
            verb,
            rule = root.name(),
            ancestors = lineage.chain().len(),
            "conjugating"
        );

        let mut forms = Vec::with_capacity(self.selected.forms.len());
        for form in &self.selected.forms {
            let group = lineage.group_modifiers(form);
            let mut slots = vec![];
            for paradigm in &self.selected.paradigms {
                let person = match lineage.person_modifiers(form, &paradigm.person, &group) {
                    Resolved::Ignored => continue,
                    Resolved::Modifiers(m) => m,
                };
                let modifiers = match lineage.paradigm_modifiers(
                    form,
                    &paradigm.person,
                    &paradigm.quantity,
                    &person,
                ) {
                    Resolved::Ignored => continue,
                    Resolved::Modifiers(m) => m,
                };
                let conjugated = transform::apply(verb, &modifiers);
                trace!(
                    form = form.as_str(),
                    paradigm = %paradigm,
                    conjugated = conjugated.as_str()
                );
                slots.push((paradigm.to_string(), conjugated));
            }
            forms.push(FormConjugation {
                form: form.clone(),
                slots,
            });
        }

        Ok(Some(Conjugation { forms }))
    }
}

/// Every conjugated form of one verb, in the order the language declares
/// its forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conjugation {
    forms: Vec<FormConjugation>,
}

impl Conjugation {
    pub fn get(&self, form: &str) -> Option<&FormConjugation> {
        self.forms.iter().find(|f| f.form == form)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormConjugation> {
        self.forms.iter()
    }

    /// The number of forms, including forms where every slot was ignored.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// The conjugated slots of one form, keyed by person and quantity (`1sg`,
/// `3pl`, ...), in the order the language declares its paradigms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConjugation {
    form: String,
    slots: Vec<(String, String)>,
}

impl FormConjugation {
    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Conjugation, Conjugator};
    use crate::{
        error::{ConfigError, Error, LoadError, LookupError},
        options::Options,
        tree::{ParadigmKey, RuleTree},
    };
    use std::{path::Path, thread};

    fn french(options: Options) -> Conjugator {
        Conjugator::load_from(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
            "fr",
            options,
        )
        .unwrap()
    }

    fn as_pairs(conjugation: &Conjugation) -> Vec<(String, Vec<(String, String)>)> {
        conjugation
            .iter()
            .map(|f| {
                (
                    f.form().to_string(),
                    f.iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn declared_forms_and_paradigms() {
        let conjugator = french(Options::new());
        assert_eq!(conjugator.lang(), "fr");
        assert_eq!(
            conjugator.forms(),
            [
                "prs", "pcomp", "imp", "plu", "futsimp", "futant", "passimp", "pstant", "subprs",
                "subpst", "subimp", "subplu", "cprs", "cpst", "cpst2", "impprs", "imppst",
            ],
        );
        let keys = conjugator
            .paradigms()
            .iter()
            .map(ParadigmKey::to_string)
            .collect::<Vec<_>>();
        assert_eq!(keys, ["1sg", "2sg", "3sg", "1pl", "2pl", "3pl"]);
    }

    #[test]
    fn etre() {
        let conjugator = french(Options::new());
        let conjugation = conjugator.conjugate("être").unwrap().unwrap();

        let full = ["1sg", "2sg", "3sg", "1pl", "2pl", "3pl"];
        let imperative = ["2sg", "1pl", "2pl"];
        let tests: [(&str, &[&str], &[&str]); 17] = [
            ("prs", &full, &["suis", "es", "est", "sommes", "êtes", "sont"]),
            ("pcomp", &full, &["ai été", "as été", "a été", "avons été", "avez été", "ont été"]),
            ("imp", &full, &["étais", "étais", "était", "étions", "étiez", "étaient"]),
            (
                "plu",
                &full,
                &["avais été", "avais été", "avait été", "avions été", "aviez été", "avaient été"],
            ),
            ("futsimp", &full, &["serai", "seras", "sera", "serons", "serez", "seront"]),
            (
                "futant",
                &full,
                &["aurai été", "auras été", "aura été", "aurons été", "aurez été", "auront été"],
            ),
            ("passimp", &full, &["fus", "fus", "fut", "fûmes", "fûtes", "furent"]),
            (
                "pstant",
                &full,
                &["eus été", "eus été", "eut été", "eûmes été", "eûtes été", "eurent été"],
            ),
            ("subprs", &full, &["sois", "sois", "soit", "soyons", "soyez", "soient"]),
            (
                "subpst",
                &full,
                &["aie été", "aies été", "ait été", "ayons été", "ayez été", "aient été"],
            ),
            ("subimp", &full, &["fusse", "fusses", "fût", "fussions", "fussiez", "fussent"]),
            (
                "subplu",
                &full,
                &[
                    "eusse été",
                    "eusses été",
                    "eût été",
                    "eussions été",
                    "eussiez été",
                    "eussent été",
                ],
            ),
            ("cprs", &full, &["serais", "serais", "serait", "serions", "seriez", "seraient"]),
            (
                "cpst",
                &full,
                &[
                    "aurais été",
                    "aurais été",
                    "aurait été",
                    "aurions été",
                    "auriez été",
                    "auraient été",
                ],
            ),
            (
                "cpst2",
                &full,
                &[
                    "eusse été",
                    "eusses été",
                    "eût été",
                    "eussions été",
                    "eussiez été",
                    "eussent été",
                ],
            ),
            ("impprs", &imperative, &["sois !", "soyons !", "soyez !"]),
            ("imppst", &imperative, &["aie été", "ayons été", "ayez été"]),
        ];

        assert_eq!(conjugation.len(), tests.len());
        for (form, test) in conjugation.iter().zip(tests.iter()) {
            assert_eq!(form.form(), test.0);
            let got = form.iter().collect::<Vec<_>>();
            let expect = test.1.iter().copied().zip(test.2.iter().copied()).collect::<Vec<_>>();
            assert_eq!(got, expect, "être in {}", test.0);
        }

        let imppst = conjugation.get("imppst").unwrap();
        assert_eq!(imppst.get("1sg"), None, "the imperative has no first person singular");
        assert_eq!(imppst.get("3pl"), None);
        assert_eq!(conjugation.get("pcomp").unwrap().get("1sg"), Some("ai été"));
    }

    #[test]
    fn regular_verbs_use_fallbacks() {
        let conjugator = french(Options::new());
        let tests = [
            ("parler", "prs", "1sg", "parle"),
            ("parler", "prs", "3pl", "parlent"),
            ("parler", "pcomp", "2pl", "avez parlé"),
            ("parler", "imp", "1pl", "parlions"),
            ("parler", "futsimp", "3sg", "parlera"),
            ("parler", "passimp", "3pl", "parlèrent"),
            ("parler", "impprs", "2sg", "parle !"),
            ("finir", "prs", "1pl", "finissons"),
            ("finir", "imp", "3pl", "finissaient"),
            ("finir", "pcomp", "1sg", "ai fini"),
            ("finir", "subprs", "3sg", "finisse"),
            ("finir", "cprs", "2pl", "finiriez"),
        ];
        for test in tests {
            let conjugation = conjugator.conjugate(test.0).unwrap().unwrap();
            assert_eq!(
                conjugation.get(test.1).unwrap().get(test.2),
                Some(test.3),
                "{} {} {}",
                test.0,
                test.1,
                test.2,
            );
        }
    }

    #[test]
    fn exact_entry_wins_over_fallback() {
        // "manger" also matches the "er$" fallback.
        let conjugator = french(Options::new().forms(["prs", "imp", "passimp", "futsimp"]));
        let conjugation = conjugator.conjugate("manger").unwrap().unwrap();
        let tests = [
            ("prs", "1pl", "mangeons"),
            ("prs", "2pl", "mangez"),
            ("imp", "1sg", "mangeais"),
            ("imp", "1pl", "mangions"),
            ("passimp", "3sg", "mangea"),
            ("passimp", "3pl", "mangèrent"),
            ("futsimp", "1sg", "mangerai"),
        ];
        for test in tests {
            assert_eq!(
                conjugation.get(test.0).unwrap().get(test.1),
                Some(test.2),
                "manger {} {}",
                test.0,
                test.1,
            );
        }
    }

    #[test]
    fn not_found() {
        let conjugator = french(Options::new());
        for verb in ["", "xyz", "prendre", "être "] {
            assert_eq!(conjugator.conjugate(verb).unwrap(), None, "{:?}", verb);
        }
    }

    #[test]
    fn deterministic() {
        let conjugator = french(Options::new());
        let first = conjugator.conjugate("finir").unwrap();
        let second = conjugator.conjugate("finir").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn filters_project_the_full_result() {
        let full = french(Options::new()).conjugate("parler").unwrap().unwrap();
        let conjugator = french(
            Options::new()
                .forms(["futsimp", "prs", "impprs"])
                .paradigms([("1", "sg"), ("2", "pl")]),
        );
        let filtered = conjugator.conjugate("parler").unwrap().unwrap();

        let forms = filtered.iter().map(|f| f.form()).collect::<Vec<_>>();
        assert_eq!(forms, ["prs", "futsimp", "impprs"], "declared order is kept");
        for form in filtered.iter() {
            let keys = form.iter().map(|(k, _)| k).collect::<Vec<_>>();
            let expect: &[&str] = if form.form() == "impprs" {
                &["2pl"]
            } else {
                &["1sg", "2pl"]
            };
            assert_eq!(keys, expect, "keys for {}", form.form());
            for (key, value) in form.iter() {
                assert_eq!(full.get(form.form()).unwrap().get(key), Some(value));
            }
        }
    }

    #[test]
    fn exclusion_wins() {
        let conjugator = french(
            Options::new()
                .forms(["prs", "imp"])
                .forms_except("imp")
                .paradigms_except([("3", "sg"), ("3", "pl")]),
        );
        let conjugation = conjugator.conjugate("être").unwrap().unwrap();
        assert_eq!(
            as_pairs(&conjugation),
            [(
                "prs".to_string(),
                [
                    ("1sg", "suis"),
                    ("2sg", "es"),
                    ("1pl", "sommes"),
                    ("2pl", "êtes"),
                ]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
            )],
        );
    }

    #[test]
    fn set_options() {
        let mut conjugator = french(Options::new().forms("prs"));
        assert_eq!(conjugator.conjugate("être").unwrap().unwrap().len(), 1);

        let err = conjugator
            .set_options(Options::new().forms("aorist"))
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownForm("aorist".to_string()));
        assert_eq!(
            conjugator.options(),
            &Options::new().forms("prs"),
            "failed validation leaves the old options in place",
        );
        assert_eq!(conjugator.conjugate("être").unwrap().unwrap().len(), 1);

        conjugator
            .set_options(Options::new().forms_except("prs"))
            .unwrap();
        let conjugation = conjugator.conjugate("être").unwrap().unwrap();
        assert_eq!(conjugation.len(), 16);
        assert!(conjugation.get("prs").is_none());
    }

    #[test]
    fn load_errors() {
        let err = Conjugator::load_from(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
            "xx",
            Options::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Io { .. })), "{:?}", err);

        let err = Conjugator::load_from(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
            "fr",
            Options::new().paradigms(("4", "sg")),
        )
        .unwrap_err();
        assert!(
            matches!(err, Error::Config(ConfigError::UnknownParadigm(ref p)) if p == "4sg"),
            "{:?}",
            err,
        );
    }

    const RULES: &str = r#"
<verbs>
  <meta>
    <forms><form>prs</form><form>pst</form></forms>
    <paradigms>
      <paradigm person="1" quant="sg"/>
      <paradigm person="1" quant="pl"/>
      <paradigm person="3" quant="sg"/>
    </paradigms>
    <fallbacks>
      <fallback regex="^walk" ref="regular"/>
      <fallback regex="k$" ref="strong"/>
      <fallback regex="^broken" ref="broken"/>
      <fallback regex="^loop" ref="loop-a"/>
    </fallbacks>
  </meta>
  <verbset id="regular">
    <group id="pst"><append>ed</append></group>
  </verbset>
  <verbset id="strong">
    <group id="pst"><mod match="all" search="i" replace="a"/></group>
  </verbset>
  <verbset id="broken" inherit="nowhere"/>
  <verbset id="loop-a" inherit="loop-b"/>
  <verbset id="loop-b" inherit="loop-a"/>
  <verb word="be">
    <group id="prs">
      <pdgmgroup id="1">
        <paradigm id="sg"><endlength>2</endlength><append>am</append></paradigm>
      </pdgmgroup>
      <pdgmgroup id="3" ignore="ignore">
        <paradigm id="sg"><append>is</append></paradigm>
      </pdgmgroup>
    </group>
  </verb>
  <verb word="pay">
    <group id="prs"><append>-s</append></group>
    <group id="prs">
      <pdgmgroup id="1"><append>-<!-- first person -->me</append></pdgmgroup>
    </group>
    <group id="pst"><mod match="first" search="y$" replace="$id"/></group>
  </verb>
</verbs>"#;

    fn english() -> Conjugator {
        Conjugator::from_tree("en", RuleTree::from_xml(RULES).unwrap(), Options::new()).unwrap()
    }

    #[test]
    fn unset_modifiers_leave_the_verb_bare() {
        let conjugation = english().conjugate("be").unwrap().unwrap();
        let prs = conjugation.get("prs").unwrap();
        assert_eq!(prs.get("1sg"), Some("am"));
        assert_eq!(prs.get("1pl"), Some("be"));
        assert_eq!(prs.get("3sg"), None, "an ignored paradigm group hides its paradigms");
        let pst = conjugation.get("pst").unwrap();
        assert_eq!(pst.iter().collect::<Vec<_>>(), [("1sg", "be"), ("1pl", "be"), ("3sg", "be")]);
    }

    #[test]
    fn repeated_groups_and_literal_text() {
        let conjugation = english().conjugate("pay").unwrap().unwrap();
        let prs = conjugation.get("prs").unwrap();
        assert_eq!(
            prs.iter().collect::<Vec<_>>(),
            [("1sg", "pay-me"), ("1pl", "pay-me"), ("3sg", "pay-s")],
        );
        let pst = conjugation.get("pst").unwrap();
        assert_eq!(pst.get("1sg"), Some("pa$id"), "replacement text is literal");
    }

    #[test]
    fn first_declared_fallback_wins() {
        let conjugator = english();
        let tests = [("walk", "walked"), ("drink", "drank"), ("sink", "sank")];
        for test in tests {
            let conjugation = conjugator.conjugate(test.0).unwrap().unwrap();
            assert_eq!(conjugation.get("pst").unwrap().get("3sg"), Some(test.1));
        }
    }

    #[test]
    fn broken_rule_data() {
        let conjugator = english();
        assert_eq!(
            conjugator.conjugate("broken").unwrap_err(),
            LookupError::UnknownVerbSet {
                id: "nowhere".to_string()
            },
        );
        assert_eq!(
            conjugator.conjugate("loop").unwrap_err(),
            LookupError::InheritanceCycle {
                id: "loop-a".to_string()
            },
        );
    }

    #[test]
    fn shared_between_threads() {
        let conjugator = french(Options::new());
        let expect = conjugator.conjugate("finir").unwrap();
        thread::scope(|s| {
            let conjugator = &conjugator;
            let handles = ["finir", "être", "finir"]
                .into_iter()
                .map(|verb| s.spawn(move || conjugator.conjugate(verb).unwrap()))
                .collect::<Vec<_>>();
            let results = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>();
            assert_eq!(results[0], expect);
            assert_eq!(results[2], expect);
            assert_ne!(results[1], expect);
        });
    }
}
