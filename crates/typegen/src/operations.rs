use std::collections::BTreeMap;

use async_graphql_parser::types::{
    DocumentOperations, ExecutableDocument, FragmentDefinition, OperationType, SelectionSet,
};

use crate::error::{CodegenError, CodegenResult};

/// A named operation ready for type synthesis.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub ty: OperationType,
    pub selection_set: SelectionSet,
}

/// The merged view over every parsed operation document: the operations in
/// name order plus the fragment registry they resolve against.
#[derive(Debug, Default)]
pub struct Documents {
    pub operations: Vec<Operation>,
    /// fragment name -> fragment definition
    pub fragments: BTreeMap<String, FragmentDefinition>,
}

impl Documents {
    /// Merges parsed documents. Anonymous operations are rejected (generated
    /// type names seed from the operation name), as are duplicate operation
    /// or fragment names across documents.
    pub fn collect(documents: impl IntoIterator<Item = ExecutableDocument>) -> CodegenResult<Self> {
        let mut merged = Documents::default();
        let mut seen = std::collections::BTreeSet::new();

        for document in documents {
            match document.operations {
                DocumentOperations::Single(_) => return Err(CodegenError::AnonymousOperation),
                DocumentOperations::Multiple(operations) => {
                    for (name, operation) in operations {
                        let name = name.to_string();
                        if !seen.insert(name.clone()) {
                            return Err(CodegenError::DuplicateOperation(name));
                        }
                        merged.operations.push(Operation {
                            name,
                            ty: operation.node.ty,
                            selection_set: operation.node.selection_set.node,
                        });
                    }
                }
            }

            for (name, fragment) in document.fragments {
                let name = name.to_string();
                if merged.fragments.insert(name.clone(), fragment.node).is_some() {
                    return Err(CodegenError::DuplicateFragment(name));
                }
            }
        }

        merged.operations.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(merged)
    }

    pub fn fragment(&self, name: &str) -> CodegenResult<&FragmentDefinition> {
        self.fragments
            .get(name)
            .ok_or_else(|| CodegenError::UnknownFragment(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn parse(query: &str) -> ExecutableDocument {
        async_graphql_parser::parse_query(query).unwrap()
    }

    #[test]
    fn merges_and_orders_operations() {
        let docs = Documents::collect([
            parse(indoc! {r#"
                query OpB { me { id } }
                fragment UserFields on User { name }
            "#}),
            parse("query OpA { me { id } }"),
        ])
        .unwrap();

        let names: Vec<_> = docs.operations.iter().map(|op| op.name.as_str()).collect();
        assert_eq!(names, ["OpA", "OpB"]);
        assert!(docs.fragment("UserFields").is_ok());
        assert!(matches!(
            docs.fragment("Missing"),
            Err(CodegenError::UnknownFragment(_))
        ));
    }

    #[test]
    fn rejects_anonymous_operations() {
        let result = Documents::collect([parse("{ me { id } }")]);
        assert!(matches!(result, Err(CodegenError::AnonymousOperation)));
    }

    #[test]
    fn rejects_duplicate_fragments() {
        let result = Documents::collect([
            parse("query A { me { id } } fragment F on User { name }"),
            parse("query B { me { id } } fragment F on User { name }"),
        ]);
        assert!(matches!(result, Err(CodegenError::DuplicateFragment(name)) if name == "F"));
    }
}
