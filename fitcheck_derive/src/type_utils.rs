use syn::{GenericArgument, PathArguments, Type};

/// Enum to categorize Rust types for schema generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl TypeCategory {
    pub fn as_schema_type(self) -> &'static str {
        match self {
            TypeCategory::String => "string",
            TypeCategory::Integer => "integer",
            TypeCategory::Number => "number",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Array => "array",
            TypeCategory::Object => "object",
        }
    }
}

fn first_generic_argument<'a>(ty: &'a Type, wrapper: &[&str]) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && wrapper.iter().any(|w| segment.ident == w)
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner_ty)) = args.args.first()
    {
        return Some(inner_ty);
    }
    None
}

/// Determine if a type is an Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    first_generic_argument(ty, &["Option"]).is_some()
}

/// Get the inner type of an Option<T>, or the type itself
pub fn get_option_inner_type(ty: &Type) -> &Type {
    first_generic_argument(ty, &["Option"]).unwrap_or(ty)
}

/// Get the inner type of an array type like Vec<T>
pub fn get_array_inner_type(ty: &Type) -> Option<&Type> {
    first_generic_argument(ty, &["Vec", "HashSet", "BTreeSet"])
}

/// Get type category from Rust type
pub fn get_type_category(ty: &Type) -> TypeCategory {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return match segment.ident.to_string().as_str() {
            "String" | "str" | "char" => TypeCategory::String,
            "bool" => TypeCategory::Boolean,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => TypeCategory::Integer,
            "f32" | "f64" => TypeCategory::Number,
            "Vec" | "HashSet" | "BTreeSet" => TypeCategory::Array,
            _ => TypeCategory::Object,
        };
    }
    if let Type::Reference(reference) = ty {
        return get_type_category(&reference.elem);
    }
    TypeCategory::Object
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Apply a serde `rename_all` rule to a snake_case field name
pub fn apply_rename_all(field_name: &str, rule: &str) -> String {
    match rule {
        "lowercase" => field_name.to_lowercase(),
        "UPPERCASE" => field_name.to_uppercase(),
        "camelCase" => {
            let mut parts = field_name.split('_').filter(|p| !p.is_empty());
            let mut result = parts.next().unwrap_or_default().to_string();
            for part in parts {
                result.push_str(&capitalize(part));
            }
            result
        }
        "PascalCase" => field_name
            .split('_')
            .filter(|p| !p.is_empty())
            .map(capitalize)
            .collect(),
        "SCREAMING_SNAKE_CASE" => field_name.to_uppercase(),
        "kebab-case" => field_name.replace('_', "-"),
        _ => field_name.to_string(),
    }
}
