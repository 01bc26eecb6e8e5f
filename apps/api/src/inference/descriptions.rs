//! The 16 MBTI types and their static prose descriptions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const NO_DESCRIPTION: &str = "No description available.";

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MbtiType {
    INTJ,
    INTP,
    ENTJ,
    ENTP,
    INFJ,
    INFP,
    ENFJ,
    ENFP,
    ISTJ,
    ISFJ,
    ESTJ,
    ESFJ,
    ISTP,
    ISFP,
    ESTP,
    ESFP,
}

impl MbtiType {
    pub const ALL: [MbtiType; 16] = [
        MbtiType::INTJ,
        MbtiType::INTP,
        MbtiType::ENTJ,
        MbtiType::ENTP,
        MbtiType::INFJ,
        MbtiType::INFP,
        MbtiType::ENFJ,
        MbtiType::ENFP,
        MbtiType::ISTJ,
        MbtiType::ISFJ,
        MbtiType::ESTJ,
        MbtiType::ESFJ,
        MbtiType::ISTP,
        MbtiType::ISFP,
        MbtiType::ESTP,
        MbtiType::ESFP,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MbtiType::INTJ => "INTJ",
            MbtiType::INTP => "INTP",
            MbtiType::ENTJ => "ENTJ",
            MbtiType::ENTP => "ENTP",
            MbtiType::INFJ => "INFJ",
            MbtiType::INFP => "INFP",
            MbtiType::ENFJ => "ENFJ",
            MbtiType::ENFP => "ENFP",
            MbtiType::ISTJ => "ISTJ",
            MbtiType::ISFJ => "ISFJ",
            MbtiType::ESTJ => "ESTJ",
            MbtiType::ESFJ => "ESFJ",
            MbtiType::ISTP => "ISTP",
            MbtiType::ISFP => "ISFP",
            MbtiType::ESTP => "ESTP",
            MbtiType::ESFP => "ESFP",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MbtiType::INTJ => "INTJ (Architect) - Strategic, logical, and independent thinkers. It is a personality type with the Introverted, Intuitive, Thinking, and Judging traits. These thoughtful tacticians love perfecting the details of life, applying creativity and rationality to everything they do. Their inner world is often a private, complex one.",
            MbtiType::INTP => "INTP (Logician) - Analytical, curious, and inventive problem-solvers. It is a personality type with the Introverted, Intuitive, Thinking, and Prospecting traits. These flexible thinkers enjoy taking an unconventional approach to many aspects of life. They often seek out unlikely paths, mixing willingness to experiment with personal creativity.",
            MbtiType::ENTJ => "ENTJ (Commander) - Bold, decisive, and natural leaders. It is a personality type with the Extraverted, Intuitive, Thinking, and Judging traits. They are decisive people who love momentum and accomplishment. They gather information to construct their creative visions but rarely hesitate for long before acting on them.",
            MbtiType::ENTP => "ENTP (Debater) - Energetic, quick-witted, and challenge-driven individuals. It is a personality type with the Extraverted, Intuitive, Thinking, and Prospecting traits. They tend to be bold and creative, deconstructing and rebuilding ideas with great mental agility. They pursue their goals vigorously despite any resistance they might encounter.",
            MbtiType::INFJ => "INFJ (Advocate) - Visionary, deep-thinking, and compassionate. It is a personality type with the Introverted, Intuitive, Feeling, and Judging traits. They tend to approach life with deep thoughtfulness and imagination. Their inner vision, personal values, and a quiet, principled version of humanism guide them in all things.",
            MbtiType::INFP => "INFP (Mediator) - Creative, introspective, and idealistic dreamers. It is a personality type with the Introverted, Intuitive, Feeling, and Prospecting traits. These rare personality types tend to be quiet, open-minded, and imaginative, and they apply a caring and creative approach to everything they do.",
            MbtiType::ENFJ => "ENFJ (Protagonist) - Charismatic, inspiring, and people-focused leaders. It is a personality type with the Extraverted, Intuitive, Feeling, and Judging traits. These warm, forthright types love helping others, and they tend to have strong ideas and values. They back their perspective with the creative energy to achieve their goals.",
            MbtiType::ENFP => "ENFP (Campaigner) - Enthusiastic, free-spirited, and open-minded adventurers. It is a personality type with the Extraverted, Intuitive, Feeling, and Prospecting traits. These people tend to embrace big ideas and actions that reflect their sense of hope and goodwill toward others. Their vibrant energy can flow in many directions.",
            MbtiType::ISTJ => "ISTJ (Logistician) - Organized, detail-oriented, and highly responsible. It is a personality type with the Introverted, Observant, Thinking, and Judging traits. These people tend to be reserved yet willful, with a rational outlook on life. They compose their actions carefully and carry them out with methodical purpose.",
            MbtiType::ISFJ => "ISFJ (Defender) - Warm-hearted, dedicated, and service-oriented. It is a personality type with the Introverted, Observant, Feeling, and Judging traits. These people tend to be warm and unassuming in their own steady way. They're efficient and responsible, giving careful attention to practical details in their daily lives.",
            MbtiType::ESTJ => "ESTJ (Executive) - Efficient, hardworking, and practical decision-makers. It is a personality type with the Extraverted, Observant, Thinking, and Judging traits. They possess great fortitude, emphatically following their own sensible judgment. They often serve as a stabilizing force among others, able to offer solid direction amid adversity.",
            MbtiType::ESFJ => "ESFJ (Consul) - Supportive, loyal, and community-oriented individuals. It is a personality type with the Extraverted, Observant, Feeling, and Judging traits. They are attentive and people-focused, and they enjoy taking part in their social community. Their achievements are guided by decisive values, and they willingly offer guidance to others.",
            MbtiType::ISTP => "ISTP (Virtuoso) - Practical, hands-on, and adventurous problem-solvers. It is a personality type with the Introverted, Observant, Thinking, and Prospecting traits. They tend to have an individualistic mindset, pursuing goals without needing much external connection. They engage in life with inquisitiveness and personal skill, varying their approach as needed.",
            MbtiType::ISFP => "ISFP (Adventurer) - Artistic, flexible, and in-the-moment explorers. It is a personality type with the Introverted, Observant, Feeling, and Prospecting traits. They tend to have open minds, approaching life, new experiences, and people with grounded warmth. Their ability to stay in the moment helps them uncover exciting potentials.",
            MbtiType::ESTP => "ESTP (Entrepreneur) - Energetic, risk-taking, and action-oriented. It is a personality type with the Extraverted, Observant, Thinking, and Prospecting traits. They tend to be energetic and action-oriented, deftly navigating whatever is in front of them. They love uncovering life's opportunities, whether socializing with others or in more personal pursuits.",
            MbtiType::ESFP => "ESFP (Entertainer) - Fun-loving, expressive, and highly social individuals. It is a personality type with the Extraverted, Observant, Feeling, and Prospecting traits. These people love vibrant experiences, engaging in life eagerly and taking pleasure in discovering the unknown. They can be very social, often encouraging others into shared activities.",
        }
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an MBTI type")]
pub struct UnknownMbtiType(pub String);

impl FromStr for MbtiType {
    type Err = UnknownMbtiType;

    /// Exact, case-sensitive match on the four-letter code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MbtiType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMbtiType(s.to_string()))
    }
}

/// Description for a predicted label, or `NO_DESCRIPTION` for anything
/// outside the table. Never fails.
pub fn describe(label: &str) -> &'static str {
    label
        .parse::<MbtiType>()
        .map(MbtiType::description)
        .unwrap_or(NO_DESCRIPTION)
}
