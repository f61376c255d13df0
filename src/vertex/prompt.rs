use crate::models::Category;

/// Fixed generation prompt. The category label is the only substitution.
pub fn build_prompt(category: &Category) -> String {
    format!(
        "A photorealistic, high-definition photograph of a 5-month-old Indian {category} baby. \
The baby must look like a clear, natural genetic blend of the two Indian parents shown in the reference images.\n\
\n\
Blend these features from both parents:\n\
- Eye color and shape: combine the eyes of both parents.\n\
- Hair color and texture: a realistic mix of both parents' hair.\n\
- Nose shape: a believable combination of both parents' noses.\n\
- Face shape and jawline: blend the overall facial structure, including cheeks and chin.\n\
- Skin tone: an authentic, natural blend of both parents' complexions.\n\
\n\
The result must be indistinguishable from a real photograph, with realistic skin texture, \
soft natural lighting and fine detail. Avoid any cartoonish, artistic, painterly or CGI look. \
The baby has a neutral or slightly happy expression and looks towards the camera.",
        category = category.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_substitutes_category_verbatim() {
        let category: Category = "Girl".parse().unwrap();
        let prompt = build_prompt(&category);
        assert!(prompt.contains("5-month-old Indian Girl baby"));
    }

    #[test]
    fn test_prompt_names_blended_features() {
        let prompt = build_prompt(&"boy".parse().unwrap());
        for feature in ["Eye color", "Hair color", "Nose shape", "Face shape", "Skin tone"] {
            assert!(prompt.contains(feature), "prompt is missing {feature}");
        }
        assert!(prompt.contains("Avoid any cartoonish"));
    }

    #[test]
    fn test_prompt_is_otherwise_constant() {
        let male = build_prompt(&"male".parse().unwrap());
        let female = build_prompt(&"female".parse().unwrap());
        assert_eq!(male.replace("Indian male baby", ""), female.replace("Indian female baby", ""));
    }
}
