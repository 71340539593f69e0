//! Sample story and claims for demos and the wizard's defaults.

use crate::analysis::{Claim, TraitKind, TraitLevel};

/// Name of the sample story's main character.
pub const SAMPLE_CHARACTER: &str = "Marcus";

/// A short three-chapter story about Marcus.
pub const SAMPLE_NOVEL: &str = r#"Chapter 1: The Edge of the Forest

Morning settled over the town without a sound. Marcus waited where the trees began, looking back at the only home he had known. People had always called him different, stronger and more willing to take a chance than the others.

A scream rose from the village. Marcus ran toward it before he could think. His father had raised him to be cautious and to respect the council, but he had never been good at rules.

The beast was enormous, a shadow with teeth. Two villagers already lay still. The mayor shouted orders and nobody moved. Marcus had never been in a real fight and had never hurt anyone. He decided to attack anyway.

His first blow landed with terrible force and the beast staggered. He felt determined and calm. This was who he was meant to be.

Chapter 2: The Hero Who Lied

The village called Marcus a hero, but he knew better. He had enjoyed the fight. He had wanted to hurt it again.

His mother said he was honest to a fault and could never tell a lie. Now he lied to her every evening. He told everyone the beast had nearly killed him, when in truth it had been easy.

The council ruled the village and everyone was expected to obey. After that night he began to rebel against them openly. Why should he obey old men who hid while he fought?

Chapter 3: Exile

Marcus took to walking the forest alone. He told people he was clearing the roads of danger, but he was running from what he had become.

Elena followed him one day. She told him she was not afraid of him. He chose to tell her the whole truth about the fight and how good it had felt.

When Elena repeated his confession, the village turned on him. The council voted to exile him, and he went without a word. Honesty, caution and obedience had felt like chains. The capacity for violence felt like freedom, or so he told himself."#;

/// The four default backstory claims for the sample character.
pub fn default_claims() -> Vec<Claim> {
    vec![
        Claim::new("Avoids violence", TraitKind::Violence, TraitLevel::Low),
        Claim::new("Always tells the truth", TraitKind::Honesty, TraitLevel::High),
        Claim::new("Cautious and careful", TraitKind::Risk, TraitLevel::Low),
        Claim::new("Respects authority", TraitKind::Authority, TraitLevel::High),
    ]
}
