use std::fmt;

use crate::{Type, TypeEnv};

/// Renders types the way they would be written in source, for logs and CLI output.
///
/// Class names drop their package (`kotlin.collections.Map.Entry` prints as `Map.Entry`);
/// flexible types print as `(lower..upper)`.
pub struct TypeDisplay<'a> {
    env: &'a dyn TypeEnv,
    ty: &'a Type,
}

pub fn format_type(env: &dyn TypeEnv, ty: &Type) -> String {
    TypeDisplay { env, ty }.to_string()
}

impl<'a> TypeDisplay<'a> {
    pub fn new(env: &'a dyn TypeEnv, ty: &'a Type) -> Self {
        Self { env, ty }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(self.env, self.ty, f)
    }
}

fn write_type(env: &dyn TypeEnv, ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Type::Class(class) => {
            match env.class(class.def) {
                Some(def) => f.write_str(simple_name(&def.name))?,
                None => write!(f, "<class#{}>", class.def.0)?,
            }
            if !class.args.is_empty() {
                f.write_str("<")?;
                for (idx, arg) in class.args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write_type(env, arg, f)?;
                }
                f.write_str(">")?;
            }
            if class.nullable {
                f.write_str("?")?;
            }
            Ok(())
        }
        Type::TypeParam(id) => match env.type_param(*id) {
            Some(def) => f.write_str(&def.name),
            None => write!(f, "<tparam#{}>", id.0),
        },
        Type::Flexible(flex) => {
            f.write_str("(")?;
            write_type(env, &flex.lower, f)?;
            f.write_str("..")?;
            write_type(env, &flex.upper, f)?;
            f.write_str(")")
        }
        Type::Error => f.write_str("<error>"),
    }
}

fn simple_name(name: &str) -> &str {
    let mut offset = 0;
    for segment in name.split('.') {
        if segment.chars().next().is_some_and(char::is_uppercase) {
            return &name[offset..];
        }
        offset += segment.len() + 1;
    }
    name
}
