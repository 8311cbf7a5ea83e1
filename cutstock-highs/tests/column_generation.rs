use cutstock::*;
use cutstock_highs::HighsModel;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

#[derive(Default)]
struct Trace {
    objectives : Vec<f64>,
    pool_sizes : Vec<usize>,
    columns    : Vec<PricingSolution>,
}

impl Reporter for Trace {
    fn iteration(& mut self, _iter : usize, relaxation : &RelaxationSolution) {
        self.objectives.push(relaxation.objective);
        self.pool_sizes.push(relaxation.usage.len());
    }
    fn new_column(& mut self, _iter : usize, priced : &PricingSolution) {
        self.columns.push(priced.clone());
    }
}

fn run(instance : &Instance, config : Config) -> (CuttingPlan,Trace) {
    let mut trace = Trace::default();
    let plan = ColumnGeneration::new(instance.clone(), config)
        .run(HighsModel::new(), HighsModel::new(), & mut trace)
        .unwrap();
    (plan,trace)
}

fn check_plan(instance : &Instance, plan : &CuttingPlan, trace : &Trace) {
    let n = instance.num_items();

    // seeds first
    for (i,e) in plan.entries.iter().take(n).enumerate() {
        assert_eq!(e.pattern,Pattern::greedy(instance,i));
    }
    assert!(plan.entries.iter().all(|e| instance.fits(e.pattern.counts())));
    assert!(plan.satisfies(instance));

    // one new column per iteration except the last
    assert_eq!(trace.objectives.len(),plan.iterations);
    assert_eq!(trace.columns.len(),plan.iterations-1);
    assert_eq!(plan.num_patterns(),n + trace.columns.len());
    assert!(trace.pool_sizes.windows(2).all(|w| w[1] == w[0]+1));
    assert!(trace.columns.iter().all(|c| c.value > 1.0 + EPSILON));
    assert!(trace.objectives.windows(2).all(|w| w[1] <= w[0] + 1e-7));

    assert_eq!(plan.status,SolutionStatus::Optimal);
    assert!(plan.stock_units() >= plan.lower_bound());
    let total : f64 = instance.item_sizes().iter().zip(instance.item_demand().iter()).map(|(s,d)| s*d).sum();
    assert!(plan.relaxation_bound >= total / instance.stock_length() - 1e-6);
    assert_eq!(plan.entries.iter().map(|e| e.usage).sum::<u64>(),plan.stock_units());
}

#[test]
fn reference_instance() {
    let instance = Instance::new(17.0,vec![3.0,4.0,5.0],vec![20.0,25.0,30.0]).unwrap();
    let (plan,trace) = run(&instance, Config::default());
    check_plan(&instance,&plan,&trace);

    // zero waste patterns exist, so the relaxation reaches total length / stock length
    assert!((plan.relaxation_bound - 310.0/17.0).abs() < 1e-5);
    assert_eq!(plan.lower_bound(),19);
    assert!(plan.stock_units() <= 21);
    assert!(plan.iterations >= 2);
}

#[test]
fn single_item_stops_after_seeding() {
    let instance = Instance::new(10.0,vec![3.0],vec![7.0]).unwrap();
    let (plan,trace) = run(&instance, Config::default());
    check_plan(&instance,&plan,&trace);
    assert_eq!(plan.iterations,1);
    assert_eq!(plan.num_patterns(),1);
    assert_eq!(plan.entries[0].pattern.counts(),&[3]);
    assert_eq!(plan.stock_units(),3);
}

#[test]
fn decimal_lengths() {
    let instance = Instance::new(0.3,vec![0.1,0.2],vec![10.0,10.0]).unwrap();
    let (plan,trace) = run(&instance, Config::default());
    check_plan(&instance,&plan,&trace);
    assert_eq!(plan.entries[0].pattern.counts(),&[3,0]);
    assert!((plan.relaxation_bound - 10.0).abs() < 1e-6);
    assert_eq!(plan.stock_units(),10);

    let instance = Instance::new(2.5,vec![0.3,0.45,0.7,1.1],vec![31.0,12.0,17.0,9.0]).unwrap();
    let (plan,trace) = run(&instance, Config::default());
    check_plan(&instance,&plan,&trace);
}

#[test]
fn oversized_item() {
    let instance = Instance::new(10.0,vec![3.0,10.5],vec![7.0,1.0]).unwrap();
    let r = ColumnGeneration::new(instance, Config::default()).run(HighsModel::new(), HighsModel::new(), & mut ());
    assert!(matches!(r,Err(CutStockError::ItemTooLarge{ item : 1, .. })));
}

#[test]
fn random_instances() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..12 {
        let n = rng.gen_range(1..7);
        let stock_length = rng.gen_range(50..200) as f64;
        let sizes : Vec<f64> = (0..n).map(|_| rng.gen_range(5..=(stock_length as usize)/2) as f64).collect();
        let demand : Vec<f64> = (0..n).map(|_| rng.gen_range(0..40) as f64).collect();
        let instance = Instance::new(stock_length,sizes,demand).unwrap();

        let (plan,trace) = run(&instance, Config::default());
        check_plan(&instance,&plan,&trace);
    }
}

#[test]
fn keep_duplicates_still_terminates() {
    let instance = Instance::new(100.0,vec![45.0,36.0,31.0,14.0],vec![97.0,610.0,395.0,211.0]).unwrap();
    let (plan,trace) = run(&instance, Config::default().with_skip_duplicates(false));
    check_plan(&instance,&plan,&trace);
    assert!(plan.iterations < 100);
}

#[test]
fn instance_file_and_model_dumps() {
    let dir = std::env::temp_dir().join(format!("cutstock-test-{}",std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("instance.txt");
    std::fs::write(&path,"17\n3\n3, 4, 5\n20, 25, 30\n").unwrap();

    let instance = Instance::from_file(&path).unwrap();
    let (plan,_) = run(&instance, Config::default().with_dump_dir(&dir));
    assert!(plan.satisfies(&instance));

    let master = std::fs::read_to_string(dir.join("master.lp")).unwrap();
    let pricing = std::fs::read_to_string(dir.join("pricing.lp")).unwrap();
    assert!(master.starts_with("\\ Problem name: master"));
    assert!(master.contains("General"));
    assert!(pricing.contains("Maximize"));
    std::fs::remove_dir_all(&dir).unwrap();
}
