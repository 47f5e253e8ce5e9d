use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use turncard_core::{
    ActionCleanup, Card, Chooser, CleanupError, CombatConfig, CombatState, Combatant,
    CombatantUpdate, Deck, EventBus, Host, KeepState, NoticeLevel, Notifier, RulesProvider,
    TokenService, Transport, TransportError,
};

fn one() -> u32 {
    1
}

fn default_seed() -> u64 {
    901
}

fn default_rounds() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize)]
struct Scenario {
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default)]
    deck: DeckSpec,
    #[serde(default)]
    config: CombatConfig,
    combatants: Vec<CombatantSpec>,
    #[serde(default = "default_rounds")]
    rounds: u32,
}

/// Either a numbered deck size or an explicit card list, top first.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DeckSpec {
    Size(u32),
    Cards(Vec<CardSpec>),
}

impl Default for DeckSpec {
    fn default() -> Self {
        Self::Size(10)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CardSpec {
    value: i32,
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CombatantSpec {
    id: String,
    name: String,
    #[serde(default = "one")]
    draws: u32,
    #[serde(default = "one")]
    speed: u32,
    #[serde(default)]
    keep_state: KeepState,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    group_leader: bool,
    #[serde(default)]
    lock_initiative: bool,
    #[serde(default)]
    defeated: bool,
    #[serde(default)]
    hidden: bool,
}

impl CombatantSpec {
    fn to_combatant(&self) -> Combatant {
        let mut combatant = Combatant::new(&self.id, &self.name);
        combatant.keep_state = self.keep_state;
        combatant.group_id = self.group_id.clone();
        combatant.group_leader = self.group_leader;
        combatant.lock_initiative = self.lock_initiative;
        combatant.defeated = self.defeated;
        combatant.hidden = self.hidden;
        combatant
    }
}

fn demo_spec(id: &str, name: &str) -> CombatantSpec {
    CombatantSpec {
        id: id.to_string(),
        name: name.to_string(),
        draws: 1,
        speed: 1,
        keep_state: KeepState::default(),
        group_id: None,
        group_leader: false,
        lock_initiative: false,
        defeated: false,
        hidden: false,
    }
}

fn demo_scenario() -> Scenario {
    let mut greta = demo_spec("greta", "Greta");
    greta.draws = 2;
    let mut sten = demo_spec("sten", "Sten");
    sten.speed = 2;
    let mut wolf = demo_spec("wolf", "Wolf Matriarch");
    wolf.group_leader = true;
    let mut pup_one = demo_spec("pup-1", "Wolf Pup");
    pup_one.group_id = Some("wolf".to_string());
    let mut pup_two = demo_spec("pup-2", "Wolf Pup");
    pup_two.group_id = Some("wolf".to_string());

    Scenario {
        seed: default_seed(),
        deck: DeckSpec::default(),
        config: CombatConfig {
            auto_draw: true,
            duplicate_on_start: true,
            reset_deck_on_round_start: true,
            ..CombatConfig::default()
        },
        combatants: vec![greta, sten, wolf, pup_one, pup_two],
        rounds: default_rounds(),
    }
}

fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let scenario =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(scenario)
}

/// Draw counts and speeds from the scenario file. Duplicated tokens look up
/// the combatant they were copied from.
struct ScenarioRules {
    draws: HashMap<String, u32>,
    speeds: HashMap<String, u32>,
}

impl ScenarioRules {
    fn new(specs: &[CombatantSpec]) -> Self {
        let mut draws = HashMap::new();
        let mut speeds = HashMap::new();
        for spec in specs {
            draws.insert(spec.id.clone(), spec.draws.max(1));
            speeds.insert(spec.id.clone(), spec.speed.max(1));
        }
        Self { draws, speeds }
    }

    fn base_id(id: &str) -> &str {
        id.split('#').next().unwrap_or(id)
    }
}

impl RulesProvider for ScenarioRules {
    fn cards_to_draw(&self, combatant: &Combatant) -> u32 {
        self.draws
            .get(Self::base_id(&combatant.id))
            .copied()
            .unwrap_or(1)
    }

    fn speed(&self, combatant: &Combatant) -> u32 {
        self.speeds
            .get(Self::base_id(&combatant.id))
            .copied()
            .unwrap_or(1)
    }
}

/// Headless chooser: cancelling every dialog resolves to the best card and
/// combat always ends when asked.
struct AutoChooser;

impl Chooser for AutoChooser {
    fn choose_card(
        &self,
        _combatant: &Combatant,
        _sorted: &[Card],
        _default: &Card,
    ) -> Option<u32> {
        None
    }
}

#[derive(Default)]
struct MemoryTransport {
    batches: usize,
    snapshots: usize,
}

impl Transport for MemoryTransport {
    fn apply_updates(&mut self, _updates: &[CombatantUpdate]) -> Result<(), TransportError> {
        self.batches += 1;
        Ok(())
    }

    fn persist_history(
        &mut self,
        _round: u32,
        _snapshot: &[Combatant],
    ) -> Result<(), TransportError> {
        self.snapshots += 1;
        Ok(())
    }

    fn persist_round_state(&mut self, _combatants: &[Combatant]) -> Result<(), TransportError> {
        Ok(())
    }
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        println!("notice[{level:?}]: {message}");
    }

    fn play_sound(&mut self, sound: &str) {
        println!("sound: {sound}");
    }
}

struct TokenDuplicator;

impl TokenService for TokenDuplicator {
    fn duplicate(&mut self, combatant: &Combatant, copies: u32) -> Vec<Combatant> {
        (0..copies)
            .map(|n| {
                let mut copy = combatant.clone();
                copy.id = format!("{}#{}", combatant.id, n + 2);
                copy.name = format!("{} #{}", combatant.name, n + 2);
                copy
            })
            .collect()
    }

    fn sharing_token(&self, combatant: &Combatant) -> Vec<String> {
        vec![combatant.id.clone()]
    }
}

struct NoCleanup;

impl ActionCleanup for NoCleanup {
    fn remove_transient_actions(&mut self, _combatant_id: &str) -> Result<(), CleanupError> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct RoundReport {
    round: u32,
    turn: usize,
    order: Vec<OrderEntry>,
}

#[derive(Debug, Serialize)]
struct OrderEntry {
    id: String,
    name: String,
    initiative: Option<f64>,
    card_value: Option<f64>,
    card_name: Option<String>,
}

fn report(state: &CombatState, events: &mut EventBus, json: bool) -> anyhow::Result<()> {
    for event in events.drain() {
        println!("event: {event:?}");
    }
    let order = state.turn_order();
    if json {
        let report = RoundReport {
            round: state.round,
            turn: state.turn,
            order: order
                .iter()
                .map(|combatant| OrderEntry {
                    id: combatant.id.clone(),
                    name: combatant.name.clone(),
                    initiative: combatant.initiative,
                    card_value: combatant.card_value,
                    card_name: combatant.card_name.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("round {}:", state.round);
        for (index, combatant) in order.iter().enumerate() {
            let marker = if index == state.turn { '>' } else { ' ' };
            match (combatant.card_value, combatant.card_name.as_deref()) {
                (Some(value), Some(name)) => println!(
                    "{marker} {}. {} (card {value}: {name})",
                    index + 1,
                    combatant.name
                ),
                _ => println!("{marker} {}. {} (no card)", index + 1, combatant.name),
            }
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    scenario: Option<String>,
    seed: Option<u64>,
    json: bool,
    help: bool,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--json" => options.json = true,
            "--help" | "-h" => options.help = true,
            other => {
                if !other.starts_with('-') {
                    options.scenario = Some(other.to_string());
                }
            }
        }
        idx += 1;
    }
    options
}

fn print_help() {
    println!("turncard-cli [scenario.json] [--seed N] [--json]");
    println!("  scenario.json   JSON scenario (deck, config, combatants); see demos/");
    println!("  --seed N        override the scenario seed");
    println!("  --json          emit machine-readable round reports");
}

fn run_demo(options: &CliOptions) -> anyhow::Result<()> {
    let scenario = match &options.scenario {
        Some(path) => load_scenario(Path::new(path))?,
        None => demo_scenario(),
    };
    let seed = options.seed.unwrap_or(scenario.seed);

    let deck = match &scenario.deck {
        DeckSpec::Size(count) => Deck::numbered(*count),
        DeckSpec::Cards(cards) => Deck::from_cards(
            cards
                .iter()
                .map(|spec| Card::new(0, spec.value, &spec.name))
                .collect(),
        ),
    };
    let combatants: Vec<Combatant> = scenario
        .combatants
        .iter()
        .map(CombatantSpec::to_combatant)
        .collect();

    let rules = ScenarioRules::new(&scenario.combatants);
    let chooser = AutoChooser;
    let mut transport = MemoryTransport::default();
    let mut notifier = StdoutNotifier;
    let mut tokens = TokenDuplicator;
    let mut cleanup = NoCleanup;
    let mut host = Host {
        rules: &rules,
        chooser: &chooser,
        transport: &mut transport,
        notifier: &mut notifier,
        tokens: &mut tokens,
        cleanup: &mut cleanup,
    };

    let mut state = CombatState::new(scenario.config.clone(), deck, combatants, seed);
    let mut events = EventBus::default();

    println!("seed: {seed}, deck: {} cards", state.deck.size());
    state.start_combat(&mut host, &mut events)?;
    report(&state, &mut events, options.json)?;

    let rounds = scenario.rounds.max(1);
    for _ in 1..rounds {
        state.next_round(&mut host, &mut events)?;
        report(&state, &mut events, options.json)?;
    }

    if rounds > 1 {
        // Time travel: one round back, then forward into the restored round.
        state.previous_round(&mut host, &mut events)?;
        report(&state, &mut events, options.json)?;
        state.next_round(&mut host, &mut events)?;
        report(&state, &mut events, options.json)?;
    }

    state.end_combat(&mut host, &mut events)?;
    for event in events.drain() {
        println!("event: {event:?}");
    }
    println!(
        "transport: {} update batches, {} history snapshots",
        transport.batches, transport.snapshots
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.help {
        print_help();
        return;
    }
    if let Err(err) = run_demo(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
