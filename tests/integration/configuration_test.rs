use std::sync::{Arc, OnceLock, Weak};

use automapper::schema::TypeDescriptor;
use automapper::{
    AutoMapper, ExplicitMetadata, FieldMetadata, FieldMetadataSource, MapperConfig, MapperError,
    Mappable, typed,
};

use crate::utils::{
    EnderecoDto, EnderecoViewModel, PersonRecord, PersonSummary, PessoaDto, PessoaViewModel,
    engine, sample_pessoa,
};

#[test]
fn test_create_mapper_returns_shared_configuration() {
    let engine = engine();
    let first = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    first.rename("nome_completo", "nome");

    let second = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    assert!(first.shares_state_with(&second));
    assert_eq!(second.configuration().target_name("nome_completo"), "nome");

    let summary = second
        .map(&PersonRecord {
            nome_completo: "Ana".to_string(),
            ..PersonRecord::default()
        })
        .unwrap();
    assert_eq!(summary.nome, "Ana");
}

#[test]
fn test_engines_do_not_share_mappers() {
    let a = engine();
    let b = engine();
    let from_a = a.create_mapper::<PersonRecord, PersonSummary>().unwrap();
    let from_b = b.create_mapper::<PersonRecord, PersonSummary>().unwrap();
    from_a.ignore("score");
    assert!(!from_a.shares_state_with(&from_b));
    assert!(!from_b.configuration().is_ignored("score"));
}

#[test]
fn test_declarative_rules_are_loaded_on_creation() {
    let engine = engine();
    let mapper = engine.create_mapper::<PessoaDto, PessoaViewModel>().unwrap();
    let config = mapper.configuration();

    assert!(config.is_ignored("score"));
    assert_eq!(config.target_name("dt_nascimento"), "data_nascimento");
    // Declared on the target, applied in reverse
    assert_eq!(config.target_name("nome_completo"), "nome");
    assert!(config.named_converter("nome_completo").is_some());
    assert!(config.ad_hoc_converter("nome_completo").is_none());
}

#[test]
fn test_api_configuration_extends_declared_rules() {
    let engine = engine();
    let mapper = engine.create_mapper::<PessoaDto, PessoaViewModel>().unwrap();
    mapper.set_ad_hoc_converter(
        "nome_completo",
        typed(|name: String| Ok(format!("Sr. {name}"))),
    );

    let view = mapper.map(&sample_pessoa()).unwrap();
    assert_eq!(view.nome, "Sr. leandro ROCHA");
    assert_eq!(view.data_nascimento, "22/09/1999");
}

#[test]
fn test_explicit_metadata_source() {
    let explicit = Arc::new(ExplicitMetadata::new());
    explicit
        .rename(PersonRecord::schema_name(), "nome_completo", "nome")
        .use_converter(PersonRecord::schema_name(), "nome_completo", "shout")
        .ignore(PersonRecord::schema_name(), "score");

    crate::utils::init_logging();
    let engine = AutoMapper::new().with_metadata_source(explicit);
    engine.register_converter("shout", typed(|name: String| Ok(name.to_uppercase())));

    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    let summary = mapper
        .map(&PersonRecord {
            nome_completo: "ana".to_string(),
            score: 10.0,
            ..PersonRecord::default()
        })
        .unwrap();

    assert_eq!(summary.nome, "ANA");
    assert_eq!(summary.score, 0);
}

#[test]
fn test_first_metadata_source_wins() {
    // Overrides the declared `rename = "data_nascimento"` with an ignore
    let explicit = Arc::new(ExplicitMetadata::new());
    explicit.ignore(PessoaDto::schema_name(), "dt_nascimento");

    let engine = engine().with_metadata_source(explicit);
    let mapper = engine.create_mapper::<PessoaDto, PessoaViewModel>().unwrap();
    let config = mapper.configuration();
    assert!(config.is_ignored("dt_nascimento"));
    assert_eq!(config.target_name("dt_nascimento"), "dt_nascimento");

    let view = mapper.map(&sample_pessoa()).unwrap();
    assert_eq!(view.data_nascimento, "");
}

#[test]
fn test_unknown_converter_fails_creation() {
    #[derive(Debug, Default, Mappable)]
    struct Annotated {
        #[mapping(converter = "does_not_exist")]
        nome: String,
    }

    let engine = engine();
    let err = engine
        .create_mapper::<Annotated, PersonSummary>()
        .unwrap_err();
    match err {
        MapperError::UnknownConverter { field, converter } => {
            assert_eq!(field, "nome");
            assert_eq!(converter, "does_not_exist");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Registering the converter afterwards makes creation succeed
    engine.register_converter("does_not_exist", typed(|s: String| Ok(s)));
    assert!(engine.create_mapper::<Annotated, PersonSummary>().is_ok());
}

#[test]
fn test_config_from_json_drives_the_engine() {
    let config = MapperConfig::from_json(
        r#"{ "date_format": { "default_format": "%Y/%m/%d" }, "log_mappings": false }"#,
    )
    .unwrap();
    let engine = AutoMapper::with_config(config);
    let mapper = engine.create_mapper::<PessoaDto, PessoaViewModel>().unwrap();
    let view = mapper.map(&sample_pessoa()).unwrap();
    assert_eq!(view.data_nascimento, "1999/09/22");
}

#[test]
fn test_global_engine_is_shared() {
    let first = AutoMapper::global();
    let second = AutoMapper::global();
    assert!(std::ptr::eq(first, second));

    let a = first.create_mapper::<PersonRecord, PersonSummary>().unwrap();
    let b = second.create_mapper::<PersonRecord, PersonSummary>().unwrap();
    assert!(a.shares_state_with(&b));
}

#[test]
fn test_concurrent_creation_yields_one_mapper() {
    let engine = Arc::new(engine());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.create_mapper::<PersonRecord, PersonSummary>().unwrap())
        })
        .collect();

    let mappers: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert!(mappers.windows(2).all(|pair| pair[0].shares_state_with(&pair[1])));
}

mod cadastro {
    use automapper::Mappable;

    #[derive(Debug, Default, Mappable)]
    pub struct Endereco {
        pub rua: String,
    }
}

mod correio {
    use automapper::Mappable;

    #[derive(Debug, Default, Mappable)]
    pub struct Endereco {
        pub cep: i32,
    }
}

#[derive(Debug, Default, Mappable)]
struct EnderecoPlano {
    rua: String,
    cep: i32,
}

#[test]
fn test_same_named_types_from_different_modules_stay_distinct() {
    assert_ne!(
        cadastro::Endereco::schema_name(),
        correio::Endereco::schema_name()
    );

    let engine = engine();
    let from_cadastro = engine
        .create_mapper::<cadastro::Endereco, EnderecoPlano>()
        .unwrap();
    let from_correio = engine
        .create_mapper::<correio::Endereco, EnderecoPlano>()
        .unwrap();
    assert!(!from_cadastro.shares_state_with(&from_correio));
    assert_eq!(engine.describe(correio::Endereco::schema_ref()).fields.len(), 1);

    let plano = from_correio
        .map(&correio::Endereco { cep: 12345 })
        .unwrap();
    assert_eq!(plano.cep, 12345);
    assert_eq!(plano.rua, "");

    let plano = from_cadastro
        .map(&cadastro::Endereco {
            rua: "Rua das Flores".to_string(),
        })
        .unwrap();
    assert_eq!(plano.rua, "Rua das Flores");
    assert_eq!(plano.cep, 0);
}

#[test]
fn test_explicit_schema_name_overrides_type_path() {
    #[derive(Debug, Default, Mappable)]
    #[mappable(name = "Cep")]
    struct Cep {
        numero: i32,
    }

    assert_eq!(Cep::schema_name(), "Cep");
    assert_eq!(Cep::default().to_record().schema(), "Cep");
}

/// Metadata source that creates another mapper on its own engine
struct ReentrantSource {
    engine: OnceLock<Weak<AutoMapper>>,
}

impl FieldMetadataSource for ReentrantSource {
    fn field_metadata(&self, schema: &TypeDescriptor, _field: &str) -> Option<FieldMetadata> {
        if schema.type_name != PersonRecord::schema_name() {
            return None;
        }
        let engine = self.engine.get()?.upgrade()?;
        engine
            .create_mapper::<EnderecoDto, EnderecoViewModel>()
            .ok()?;
        assert!(engine.validate::<EnderecoDto, EnderecoViewModel>().is_valid());
        None
    }
}

#[test]
fn test_metadata_source_may_reenter_engine() {
    let source = Arc::new(ReentrantSource {
        engine: OnceLock::new(),
    });
    let engine = Arc::new(engine());
    engine.add_metadata_source(Arc::clone(&source) as Arc<dyn FieldMetadataSource>);
    assert!(source.engine.set(Arc::downgrade(&engine)).is_ok());

    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    let nested = engine
        .create_mapper::<EnderecoDto, EnderecoViewModel>()
        .unwrap();
    assert!(!mapper.shares_state_with(&nested));
    let summary = mapper
        .map(&PersonRecord {
            score: 7.9,
            ..PersonRecord::default()
        })
        .unwrap();
    assert_eq!(summary.score, 7);
}
