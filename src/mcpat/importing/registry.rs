//! Translator registry
//!
//! Maps each [`ComponentType`] to its [`Translator`]. A registry is a plain value
//! handed to the importer, so two importers (or two tests) can run side by side with
//! different translation rules.

use crate::mcpat::importing::translators::{
    GenericTranslator, LabelTranslator, OrdinalTranslator, PrefixTranslator, RootTranslator,
    Translator,
};
use crate::mcpat::target::ComponentType;
use std::collections::HashMap;

pub struct TranslatorRegistry {
    translators: HashMap<ComponentType, Box<dyn Translator>>,
    fallback: GenericTranslator,
}

impl TranslatorRegistry {
    /// Create a new empty registry; every type falls back to the generic translator.
    pub fn new() -> Self {
        TranslatorRegistry {
            translators: HashMap::new(),
            fallback: GenericTranslator,
        }
    }

    /// Register (or replace) the translator for a type
    pub fn register(&mut self, kind: ComponentType, translator: Box<dyn Translator>) {
        self.translators.insert(kind, translator);
    }

    pub fn has(&self, kind: ComponentType) -> bool {
        self.translators.contains_key(&kind)
    }

    /// The translator for a type, or the generic fallback.
    pub fn get(&self, kind: ComponentType) -> &dyn Translator {
        match self.translators.get(&kind) {
            Some(translator) => translator.as_ref(),
            None => &self.fallback,
        }
    }

    /// Create registry with the standard McPAT label table
    pub fn with_defaults() -> Self {
        use ComponentType::*;

        let mut registry = Self::new();
        let mut add = |kind: ComponentType, translator: Box<dyn Translator>| {
            registry.register(kind, translator);
        };

        add(Root, Box::new(RootTranslator));
        add(System, Box::new(LabelTranslator::new(&["System", "Processor"])));
        add(Core, Box::new(OrdinalTranslator::required("Core")));

        // Front end
        add(InstructionFetchUnit, Box::new(LabelTranslator::new(&["Instruction Fetch Unit"])));
        add(InstructionCache, Box::new(LabelTranslator::new(&["Instruction Cache"])));
        add(
            BranchTargetBuffer,
            Box::new(LabelTranslator::new(&["Branch Target Buffer"]).optional()),
        );
        add(
            BranchPredictor,
            Box::new(LabelTranslator::new(&["Branch Predictor"]).rolls_up_children()),
        );

        // Memory pipeline
        add(LoadStoreUnit, Box::new(LabelTranslator::new(&["Load Store Unit"])));
        add(DataCache, Box::new(LabelTranslator::new(&["Data Cache"])));
        add(LoadQueue, Box::new(LabelTranslator::new(&["LoadQ"])));
        add(StoreQueue, Box::new(LabelTranslator::new(&["StoreQ"])));
        add(MemoryManagementUnit, Box::new(LabelTranslator::new(&["Memory Management Unit"])));
        add(Itlb, Box::new(LabelTranslator::new(&["Itlb"])));
        add(Dtlb, Box::new(LabelTranslator::new(&["Dtlb"])));

        // Execution
        add(ExecutionUnit, Box::new(LabelTranslator::new(&["Execution Unit"])));
        add(RegisterFiles, Box::new(LabelTranslator::new(&["Register Files"])));
        add(IntegerRegisterFile, Box::new(LabelTranslator::new(&["Integer RF"])));
        add(FloatRegisterFile, Box::new(LabelTranslator::new(&["Floating Point RF"])));
        add(InstructionScheduler, Box::new(LabelTranslator::new(&["Instruction Scheduler"])));
        add(InstructionWindow, Box::new(LabelTranslator::new(&["Instruction Window"])));
        add(FpInstructionWindow, Box::new(LabelTranslator::new(&["FP Instruction Window"])));
        add(IntegerAlu, Box::new(PrefixTranslator::new("Integer ALUs")));
        add(FloatingPointUnit, Box::new(PrefixTranslator::new("Floating Point Units")));
        add(ComplexAlu, Box::new(PrefixTranslator::new("Complex ALUs")));

        // Uncore
        add(L1Directory, Box::new(OrdinalTranslator::required("First Level Directory")));
        add(
            L2Directory,
            Box::new(OrdinalTranslator::allowing_bare("Second Level Directory").optional()),
        );
        add(SharedCacheL2, Box::new(OrdinalTranslator::allowing_bare("L2")));
        add(SharedCacheL3, Box::new(OrdinalTranslator::allowing_bare("L3").optional()));
        add(Interconnect, Box::new(OrdinalTranslator::required("Bus")));
        add(
            MemoryController,
            Box::new(LabelTranslator::new(&["Memory Controller"]).rolls_up_children()),
        );
        add(Nic, Box::new(LabelTranslator::new(&["NIU"]).optional()));
        add(Pcie, Box::new(LabelTranslator::new(&["PCIe"]).optional()));
        add(FlashController, Box::new(LabelTranslator::new(&["Flash Controller"]).optional()));
        add(Generic, Box::new(GenericTranslator));

        registry
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
