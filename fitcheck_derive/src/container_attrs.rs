use syn::{Attribute, LitStr};

/// Container-level attributes for structs
#[derive(Debug, Clone, Default)]
pub struct ContainerAttributes {
    pub name: Option<String>,
    pub description: Option<String>,
    pub serde_rename_all: Option<String>,
}

impl ContainerAttributes {
    /// Collect `#[llm(...)]` and the relevant `#[serde(...)]` keys from a container.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if attr.path().is_ident("llm") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        let content: LitStr = meta.value()?.parse()?;
                        parsed.name = Some(content.value());
                        Ok(())
                    } else if meta.path.is_ident("description") {
                        let content: LitStr = meta.value()?.parse()?;
                        parsed.description = Some(content.value());
                        Ok(())
                    } else {
                        Err(meta.error("unsupported llm container attribute"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                // Other serde keys belong to serde; skip their values without failing.
                let _ = attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        let content: LitStr = meta.value()?.parse()?;
                        parsed.serde_rename_all = Some(content.value());
                    } else if meta.input.peek(syn::Token![=]) {
                        let _: syn::Expr = meta.value()?.parse()?;
                    }
                    Ok(())
                });
            }
        }

        Ok(parsed)
    }
}
