//! Baseline legal tag taxonomy
//!
//! Seed subset of the SAIJ thesaurus used when the caller supplies no
//! allowed-tag list. Terms are uppercase, singular, without articles,
//! matching the form the extraction instructions require for new tags.

/// Officially-curated baseline tags
pub const BASELINE_TAGS: &[&str] = &[
    "DESPIDO",
    "INDEMNIZACION",
    "ACCIDENTE DE TRANSITO",
    "DAÑOS Y PERJUICIOS",
    "RESPONSABILIDAD OBJETIVA",
    "RESPONSABILIDAD SUBJETIVA",
    "SEGURO DE RESPONSABILIDAD CIVIL",
    "ACCION DE AMPARO",
    "RECURSO DE APELACION",
    "RECURSO DE INCONSTITUCIONALIDAD",
    "NULIDAD",
    "CONTRATO DE TRABAJO",
    "PREAVISO",
    "ANTIGÜEDAD",
    "HORAS EXTRAS",
    "ALIMENTOS",
    "TENENCIA",
    "REGIMEN DE VISITAS",
    "DIVORCIO",
    "SUCESION",
    "HOMICIDIO",
    "LESIONES",
    "ROBO",
    "HURTO",
    "ESTAFA",
    "PRESCRIPCION",
    "CADUCIDAD",
    "COSTAS",
    "HONORARIOS",
    "MEDIDA CAUTELAR",
    "EMBARGO",
    "INHIBICION",
    "EJECUCION DE SENTENCIA",
    "COSA JUZGADA",
    "DEBIDO PROCESO",
    "DERECHO DE DEFENSA",
    "PRUEBA",
    "PERICIA",
    "TESTIGO",
    "COMPETENCIA",
];
