use std::fmt;

use serde::Serialize;
use vireo_override::{find_overridden, JavaOverrideChecker, OverrideOptions};
use vireo_types::{CallableDecl, DeclOrigin, StructuralTypeContext};

use crate::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Function,
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRef {
    pub class: String,
    pub member: String,
    pub kind: MemberKind,
}

impl MemberRef {
    fn new(class: &str, decl: &CallableDecl) -> Self {
        let kind = match decl {
            CallableDecl::Function(_) => MemberKind::Function,
            CallableDecl::Property(_) => MemberKind::Property,
        };
        Self {
            class: class.to_string(),
            member: decl.name().to_string(),
            kind,
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.member)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideMatch {
    pub candidate: MemberRef,
    pub base: MemberRef,
}

impl fmt::Display for OverrideMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} overrides {}", self.candidate, self.base)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub classes: usize,
    pub members: usize,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub matches: Vec<OverrideMatch>,
    pub summary: CheckSummary,
}

/// Checks every Java-declared member against the members of all (transitive) supertypes of its
/// class.
///
/// Base members are seen through the supertype instantiation, so `Impl : Base<String>` compares
/// against `Base<T>` members with `T` replaced by `String`. Members declared in source are never
/// candidates: the checker folds a base receiver into the candidate's value parameters and maps
/// properties onto JVM accessor names, which only holds for Java declarations.
///
/// Matches are ordered by class, then member, then supertype in breadth-first order.
pub fn check_model(model: &Model, options: OverrideOptions) -> CheckReport {
    let checker = JavaOverrideChecker::with_options(&model.store, &StructuralTypeContext, options);

    let mut matches = Vec::new();
    for class in &model.classes {
        let candidates: Vec<&CallableDecl> = class
            .members
            .iter()
            .filter(|member| member.origin() == DeclOrigin::Java)
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let scopes: Vec<_> = model
            .store
            .supertype_substitutors(class.id)
            .into_iter()
            .filter_map(|(id, substitutor)| {
                let base_class = model.class(id)?;
                let members: Vec<CallableDecl> = base_class
                    .members
                    .iter()
                    .map(|member| member.substitute(&substitutor))
                    .collect();
                Some((base_class, members))
            })
            .collect();

        for member in candidates {
            for (base_class, bases) in &scopes {
                for base in find_overridden(&checker, member, bases) {
                    let found = OverrideMatch {
                        candidate: MemberRef::new(&class.name, member),
                        base: MemberRef::new(&base_class.name, base),
                    };
                    tracing::debug!(target: "vireo.cli", %found, "override found");
                    matches.push(found);
                }
            }
        }
    }

    let summary = CheckSummary {
        classes: model.classes.len(),
        members: model.member_count(),
        matches: matches.len(),
    };
    CheckReport { matches, summary }
}
