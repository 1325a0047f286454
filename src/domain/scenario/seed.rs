//! Built-in seed tree, used when no seed file is configured.

use super::{parse_seed_document, ScenarioError, ScenarioTree};

const DEFAULT_SEED: &str = r#"{
  "scenarios": {
    "I am feeling very anxious lately.": {
      "sub_scenarios": {
        "Can you tell me more about what is making you feel anxious?": {
          "sub_scenarios": {
            "Is it related to work or personal life?": {
              "sub_scenarios": { "Work": {}, "Personal life": {} }
            },
            "Do you experience physical symptoms as well?": {
              "sub_scenarios": { "Yes": {}, "No": {} }
            }
          }
        },
        "How long have you been feeling this way?": {
          "sub_scenarios": { "A few days": {}, "More than a week": {} }
        }
      }
    },
    "I am having trouble sleeping at night.": {
      "sub_scenarios": {
        "Have you noticed any patterns or habits that might be affecting your sleep?": {
          "sub_scenarios": { "Caffeine intake": {}, "Screen time before bed": {} }
        },
        "Do you feel stressed or worried when you go to bed?": {
          "sub_scenarios": { "Yes, very stressed": {}, "No, just can't sleep": {} }
        }
      }
    },
    "I feel overwhelmed with my workload.": {
      "sub_scenarios": {
        "What tasks are causing you the most stress?": {
          "sub_scenarios": { "High-priority tasks": {}, "Volume of tasks": {} }
        },
        "How do you currently manage your workload?": {
          "sub_scenarios": { "Prioritization": {}, "Time management": {} }
        }
      }
    },
    "I am experiencing relationship problems.": {
      "sub_scenarios": {
        "Can you describe the issues you are facing in your relationship?": {
          "sub_scenarios": { "Communication issues": {}, "Trust issues": {} }
        },
        "How long have you been experiencing these problems?": {
          "sub_scenarios": { "Recently": {}, "For a long time": {} }
        }
      }
    },
    "I have been feeling very lonely and isolated.": {
      "sub_scenarios": {
        "Have you been able to connect with friends or family?": {
          "sub_scenarios": { "Yes, but still feel lonely": {}, "No, I haven't tried": {} }
        },
        "What activities do you enjoy that might help you feel less isolated?": {
          "sub_scenarios": { "Hobbies": {}, "Social gatherings": {} }
        }
      }
    }
  }
}"#;

/// The built-in five-scenario tree.
pub fn default_tree() -> Result<ScenarioTree, ScenarioError> {
    ScenarioTree::new(parse_seed_document(DEFAULT_SEED)?)
}

/// Builds a tree from a seed document's text.
pub fn tree_from_seed(text: &str) -> Result<ScenarioTree, ScenarioError> {
    ScenarioTree::new(parse_seed_document(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_is_well_formed() {
        let tree = default_tree().unwrap();
        assert_eq!(tree.roots().len(), 5);
        assert_eq!(tree.roots()[0].key(), "I am feeling very anxious lately.");
    }

    #[test]
    fn anxiety_branch_has_two_follow_ups() {
        let tree = default_tree().unwrap();
        let options = tree
            .child_options(&["I am feeling very anxious lately."])
            .unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(
            options[1].visible,
            "How long have you been feeling this way?"
        );
    }

    #[test]
    fn every_leaf_is_reachable() {
        let tree = default_tree().unwrap();
        assert!(tree
            .lookup(&[
                "I am feeling very anxious lately.",
                "Can you tell me more about what is making you feel anxious?",
                "Do you experience physical symptoms as well?",
                "No",
            ])
            .unwrap()
            .is_leaf());
    }

    #[test]
    fn seed_text_with_cycle_is_rejected() {
        let text = r#"{"scenarios": {"a": {"sub_scenarios": {"a": {}}}}}"#;
        assert!(tree_from_seed(text).is_err());
    }
}
