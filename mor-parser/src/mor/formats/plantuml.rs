//! PlantUML diagrams of rule files
//!
//!     - [to_activity_diagram]: every rule as a partition of `if / elseif` clauses. Start
//!       rules run (forked, when there are several) between `start` and `stop`; the other
//!       rules follow as free-standing partitions.
//!     - [to_digest_diagram]: a state diagram with one edge per rule package a rule can hand
//!       over to, `[*] --> rule` for start rules and `rule --> [*]` for rules that can finish.
//!
//!     PlantUML identifiers may not contain `-` or `:`, so both become `_` in names.

use std::collections::BTreeSet;

use crate::mor::rules::{Clause, Rule, RuleSet};

fn plantuml_name(name: &str) -> String {
    name.replace(['-', ':'], "_")
}

const DIAGRAM_HEADER: &str = "\
@startuml
skinparam shadowing false
skinparam backgroundColor transparent
";

fn clause(out: &mut String, clause: &Clause, first: bool) {
    let keyword = if first { "if" } else { "elseif" };
    out.push_str(&format!(
        "    {} ({}) then (yes)\n",
        keyword,
        clause.conditions.join("\n")
    ));

    let packages = clause.action.packages();
    if packages.is_empty() {
        out.push_str("            if (isempty(list_token)) then (yes)\n");
        out.push_str("                :yield>\n");
        out.push_str("            endif\n");
    } else {
        out.push_str("            fork\n");
        let branches: Vec<String> = packages
            .iter()
            .map(|package| format!("             :{}|\n             detach\n", package))
            .collect();
        out.push_str(&branches.join("        fork again\n"));
        out.push_str("        end fork\n");
    }
    out.push_str("        end\n");
}

fn partition(out: &mut String, rule: &Rule) {
    out.push_str(&format!("partition {} {{\n    start\n", plantuml_name(&rule.name)));
    if !rule.clauses.is_empty() {
        for (i, c) in rule.clauses.iter().enumerate() {
            clause(out, c, i == 0);
        }
        out.push_str("    else\n        end\n    endif\n");
    }
    out.push_str("end\n}\n");
}

/// Render a rule set as an activity diagram.
pub fn to_activity_diagram(rule_set: &RuleSet) -> String {
    let mut out = String::from(DIAGRAM_HEADER);
    out.push_str(&format!("\ntitle {}\n\nstart\n", plantuml_name(&rule_set.name)));

    let start_rules: Vec<&Rule> = rule_set.start_rules().collect();
    match start_rules.as_slice() {
        [] => {}
        [only] => partition(&mut out, only),
        [first, rest @ ..] => {
            out.push_str("fork\n");
            partition(&mut out, first);
            for rule in rest {
                out.push_str("fork again\n");
                partition(&mut out, rule);
            }
            out.push_str("end fork\n");
        }
    }
    out.push_str("\nstop\n");

    for rule in rule_set.other_rules() {
        partition(&mut out, rule);
    }
    out.push_str("@enduml\n");
    out
}

/// Render the hand-over structure of a rule set as a state diagram.
pub fn to_digest_diagram(rule_set: &RuleSet) -> String {
    let mut out = String::from(DIAGRAM_HEADER);
    out.push_str("skinparam arrow {\n    Padding 30\n}\n");
    out.push_str("skinparam linetype ortho\nhide empty description\n");
    out.push_str(&format!("\ntitle {}\n", plantuml_name(&rule_set.name)));

    for rule in &rule_set.rules {
        let name = plantuml_name(&rule.name);
        let destinations: BTreeSet<String> = rule
            .clauses
            .iter()
            .flat_map(|c| c.action.packages())
            .map(|package| plantuml_name(package))
            .collect();
        for destination in destinations {
            out.push_str(&format!("{} --> {}\n", name, destination));
        }

        if rule.clauses.iter().any(|c| c.action.packages().is_empty()) {
            out.push_str(&format!("{} --> [*]\n", name));
        }
        if rule.is_start() {
            out.push_str(&format!("[*] --> {}\n", name));
        }
    }
    out.push_str("@enduml\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::rules::RuleParser;

    const RULES: &str = "\
RULENAME: n-start
CTYPE: START
if
STARTCAT = [scat n]
then
RESULTCAT = STARTCAT
RULEPACKAGE = {n:pl, end}
if
STARTCAT = [scat pro]
then
RESULTCAT = STARTCAT
RULEPACKAGE = {}
RULENAME: end
CTYPE: END
";

    fn rule_set() -> RuleSet {
        RuleParser::new().parse("eng-rules", RULES).expect("parse")
    }

    #[test]
    fn test_names_are_made_plantuml_safe() {
        assert_eq!(plantuml_name("n-pl:x"), "n_pl_x");
    }

    #[test]
    fn test_activity_diagram() {
        insta::assert_snapshot!(to_activity_diagram(&rule_set()), @r###"
        @startuml
        skinparam shadowing false
        skinparam backgroundColor transparent

        title eng_rules

        start
        partition n_start {
            start
            if (STARTCAT = [scat n]) then (yes)
                    fork
                     :n:pl|
                     detach
                fork again
                     :end|
                     detach
                end fork
                end
            elseif (STARTCAT = [scat pro]) then (yes)
                    if (isempty(list_token)) then (yes)
                        :yield>
                    endif
                end
            else
                end
            endif
        end
        }

        stop
        partition end {
            start
        end
        }
        @enduml
        "###);
    }

    #[test]
    fn test_several_start_rules_are_forked() {
        let mut set = rule_set();
        let mut second = set.rules[0].clone();
        second.name = "v-start".into();
        set.insert(second);

        let diagram = to_activity_diagram(&set);
        assert!(diagram.contains("start\nfork\npartition n_start {"));
        assert!(diagram.contains("fork again\npartition v_start {"));
        assert!(diagram.contains("end fork\n\nstop\n"));
    }

    #[test]
    fn test_digest_diagram() {
        insta::assert_snapshot!(to_digest_diagram(&rule_set()), @r###"
        @startuml
        skinparam shadowing false
        skinparam backgroundColor transparent
        skinparam arrow {
            Padding 30
        }
        skinparam linetype ortho
        hide empty description

        title eng_rules
        n_start --> end
        n_start --> n_pl
        n_start --> [*]
        [*] --> n_start
        @enduml
        "###);
    }
}
