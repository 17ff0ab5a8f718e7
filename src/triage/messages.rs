//! Patient-facing Arabic text for triage results.

/// Red-flag reasons.
pub struct RedFlagReasons;

impl RedFlagReasons {
    pub const BREATHING: &'static str = "مشكلة في التنفس.";
    pub const UNCONSCIOUS: &'static str = "فاقد للوعي.";
    pub const SEVERE_BLEEDING: &'static str = "نزيف شديد.";
    pub const CHEST_PAIN: &'static str = "ألم صدر شديد.";
}

/// Scoring notes.
pub struct ScoreNotes;

impl ScoreNotes {
    pub const MILD_BLEEDING: &'static str = "نزيف بسيط.";
    pub const SENSITIVE_AGE: &'static str = "فئة عمرية حساسة.";
    pub const MODERATE_PAIN: &'static str = "ألم متوسط.";
    pub const SEVERE_PAIN: &'static str = "ألم شديد.";
    pub const VOMITING: &'static str = "قيء.";
    pub const DIZZINESS: &'static str = "دوخة.";
}

/// First-aid steps.
pub struct Steps;

impl Steps {
    // Very urgent
    pub const CALL_EMERGENCY: &'static str = "اتصل بالطوارئ فورًا.";
    pub const CPR: &'static str = "إذا لا يتنفس: ابدأ CPR إذا كنت تعرف الطريقة واطلب المساعدة.";
    pub const DIRECT_PRESSURE: &'static str = "اضغط بقوة على مكان النزيف بقطعة نظيفة ولا ترفع يدك.";
    pub const NOTHING_BY_MOUTH: &'static str = "لا تعطه أكل أو شرب. راقب التنفس والوعي حتى وصول الإسعاف.";

    // Moderate
    pub const VISIT_WITHIN_HOURS: &'static str = "يوصى بمراجعة طوارئ أو عيادة خلال ساعات.";
    pub const REST_AND_IMMOBILIZE: &'static str = "حاول إراحة المصاب وتجنب الحركة الزائدة.";
    pub const SMALL_SIPS: &'static str = "أعطه سوائل بكميات قليلة إذا كان واعيًا.";
    pub const ESCALATE_IF_WORSE: &'static str = "إذا تدهورت الحالة ← اتصل بالطوارئ.";

    // Simple
    pub const HOME_CARE: &'static str = "إسعاف منزلي ومتابعة.";
    pub const MILD_ANALGESIC: &'static str = "يمكن إعطاء مسكن خفيف عند الحاجة إذا لا يوجد مانع طبي.";
    pub const DIZZINESS_REST: &'static str = "اجعل المصاب يجلس أو يستلقي حتى تزول الدوخة.";
    pub const SEE_ER_IF_NEW_SYMPTOMS: &'static str = "إذا ظهرت أعراض جديدة أو زادت الحالة سوءًا ← راجع طوارئ.";

    // Shared
    pub const WOUND_CARE: &'static str = "نظف الجرح بالماء وغطّه بضماد نظيف.";
}

/// Shown with every triage response.
pub const DISCLAIMER: &str = "هذا تقييم أولي وليس تشخيصًا طبيًا.";
